use tokio::io::AsyncRead;
use tokio_util::io::SyncIoBridge;
use tracing::debug;

use crate::{
    config::ParserConfig,
    parser::{ast::Query, ParseError, QueryParser},
};

/// Parses a query read from an async source with the default configuration.
///
/// Must be called from within a tokio runtime.
pub async fn parse_query_async<R>(reader: R) -> Result<Query, ParseError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    parse_query_async_with(reader, ParserConfig::default()).await
}

/// The reader is bridged into a blocking source and the parse runs on the
/// blocking pool, pulling chunks as the grammar needs them.
pub async fn parse_query_async_with<R>(reader: R, config: ParserConfig) -> Result<Query, ParseError>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let bridge = SyncIoBridge::new(reader);

    let result = tokio::task::spawn_blocking(move || {
        let mut parser = QueryParser::from_reader(bridge, config);
        parser.read()
    })
    .await;

    match result {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(target: "soql_parser", error = %err, "parse task failed");
            ParseError::source(&format!("Parse task failed: {}", err)).err()
        },
    }
}
