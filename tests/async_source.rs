use std::io::Write;

use soql_parser::{parse_query, parse_query_async, parse_query_async_with, BufferConfig, ParseErrorKind, ParserConfig};

#[tokio::test]
async fn test_async_file_source() {
    let text = "SELECT Id, Name FROM Contact WHERE AccountId IN (SELECT Id FROM Account WHERE Industry = 'Media') LIMIT 50";
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(text.as_bytes()).expect("Failed to write query");

    let reader = tokio::fs::File::open(file.path()).await.expect("Failed to open temp file");
    let config = ParserConfig::default().with_buffer(BufferConfig::new().with_chunk_size(4));

    let query = parse_query_async_with(reader, config).await.expect("Failed to parse query");

    assert_eq!(query, parse_query(text).expect("Failed to parse query"));
}

#[tokio::test]
async fn test_async_in_memory_source() {
    let text: &'static [u8] = b"SELECT COUNT(Id) total FROM Case GROUP BY Status";

    let query = parse_query_async(text).await.expect("Failed to parse query");

    assert_eq!(query.select.items[0].alias(), Some("total"));
    assert!(query.group_by.is_some());
}

#[tokio::test]
async fn test_async_syntax_error() {
    let text: &'static [u8] = b"SELECT Id FROM Account WHERE";

    match parse_query_async(text).await {
        Ok(_) => panic!(),
        Err(err) => assert_eq!(err.kind, ParseErrorKind::Syntax),
    }
}
