use super::test_utilities::*;
use datasource::{ExhaustedBatch, FileConfig, FileSource, Source, SourceError, SourceExt};
use test_log::test;

#[test]
fn test_m_tokens_then_exhausted() {
    let config = TestConfig::new("m_tokens");

    for &m in &[1usize, 2, 10, 1000] {
        for trailing_newline in [false, true] {
            let values: Vec<i64> = (0..m as i64).map(|i| i * 7 - 300).collect();
            let path = config.token_file(
                &format!("tokens_{m}_{trailing_newline}.txt"),
                &render_tokens(&values, trailing_newline),
            );
            let mut source = FileSource::<i64>::open(&path).unwrap();

            for _ in 0..2 {
                for expected in &values {
                    assert_eq!(source.fetch(), Ok(*expected));
                }
                assert_eq!(source.fetch(), Err(SourceError::Exhausted));
                assert!(!source.has_more());
                source.reset().unwrap();
            }
        }
    }
}

#[test]
fn test_mixed_whitespace_delimiters() {
    let config = TestConfig::new("whitespace");
    let path = config.token_file("mixed.txt", "\n\n  1\t\t2\r\n3\x0b4\x0c5   \n\n");
    let mut source = FileSource::<u16>::open(&path).unwrap();

    let all: Result<Vec<u16>, SourceError> = source.elements().collect();
    assert_eq!(all, Ok(vec![1, 2, 3, 4, 5]));
}

#[test]
fn test_has_more_is_stale_before_first_read() {
    let config = TestConfig::new("stale");
    let path = config.token_file("blank.txt", "   \n\t ");
    let mut source = FileSource::<i32>::open(&path).unwrap();

    assert!(source.has_more());
    assert_eq!(source.fetch(), Err(SourceError::Exhausted));
    assert!(!source.has_more());

    source.reset().unwrap();
    assert!(source.has_more());
}

#[test]
fn test_batch_initial_check_policies() {
    let config = TestConfig::new("batch_policy");
    let path = config.token_file("three.txt", "1 2 3");

    let mut strict = FileSource::<i32>::open(&path).unwrap();
    assert_eq!(strict.fetch_batch(2), Ok(vec![1, 2]));
    assert_eq!(strict.fetch_batch(2), Ok(vec![3]));
    assert_eq!(strict.fetch_batch(2), Err(SourceError::Exhausted));

    let lenient_config = FileConfig::default().with_exhausted_batch(ExhaustedBatch::Empty);
    let mut lenient = FileSource::<i32>::open_with_config(&path, lenient_config).unwrap();
    assert_eq!(lenient.fetch_batch(5), Ok(vec![1, 2, 3]));
    assert_eq!(lenient.fetch_batch(5), Ok(Vec::new()));

    lenient.reset().unwrap();
    assert_eq!(lenient.fetch_batch(1), Ok(vec![1]));
}

#[test]
fn test_parse_error_reports_token() {
    let config = TestConfig::new("parse_error");
    let path = config.token_file("bad.txt", "10 2.5 30\n");
    let mut source = FileSource::<i32>::open(&path).unwrap();

    assert_eq!(source.fetch(), Ok(10));
    match source.fetch() {
        Err(SourceError::Parse {
            context, token, ..
        }) => {
            assert_eq!(token, "2.5");
            assert!(context.ends_with("bad.txt"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    let as_float = FileSource::<f64>::open(&path).unwrap().fetch_batch(3);
    assert_eq!(as_float, Ok(vec![10.0, 2.5, 30.0]));
}

#[test]
fn test_invalid_paths() {
    let config = TestConfig::new("invalid_paths");

    let empty = FileSource::<i32>::open("");
    assert!(matches!(empty, Err(SourceError::InvalidArgument { .. })));

    let missing = FileSource::<i32>::open(config.temp_dir_path().join("absent.txt"));
    match missing {
        Err(error @ SourceError::Io { .. }) => {
            assert!(!error.is_client_error());
            assert!(error.to_string().contains("absent.txt"));
        }
        other => panic!("expected IO error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_directory_read_is_io_error() {
    let config = TestConfig::new("directory");
    let mut source = FileSource::<i32>::open(config.temp_dir_path()).unwrap();

    assert!(matches!(source.fetch(), Err(SourceError::Io { .. })));
    assert!(matches!(source.fetch_batch(4), Err(SourceError::Io { .. })));
}

#[cfg(unix)]
#[test]
fn test_source_outlives_file_removal() {
    let config = TestConfig::new("removal");
    let path = config.token_file("transient.txt", "4 5 6");
    let mut source = FileSource::<u8>::open(&path).unwrap();

    std::fs::remove_file(&path).unwrap();
    // The open handle keeps the unlinked data readable.
    assert_eq!(source.fetch_batch(3), Ok(vec![4, 5, 6]));
    assert_eq!(source.path(), path.as_path());
}

#[test]
fn test_invalid_utf8_token_is_not_consumed() {
    let config = TestConfig::new("invalid_utf8");
    let path = config.temp_dir_path().join("binary.txt");
    std::fs::write(&path, b"1 \xff\xfe 3\n").unwrap();
    let mut source = FileSource::<i32>::open(&path).unwrap();

    assert_eq!(source.fetch(), Ok(1));
    for _ in 0..3 {
        match source.fetch() {
            Err(SourceError::Parse { token, context, .. }) => {
                assert_eq!(token, "\u{fffd}\u{fffd}");
                assert!(context.ends_with("binary.txt"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    source.reset().unwrap();
    assert_eq!(source.fetch_batch(3), Ok(vec![1]));
}
