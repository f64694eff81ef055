use datasource::{ArrayConfig, ArraySource, Source, SourceError, SourceExt};
use test_log::test;

#[test]
fn test_has_more_tracks_cursor() {
    for &n in &[0usize, 1, 2, 17, 128] {
        let elements: Vec<usize> = (0..n).collect();
        let mut source = ArraySource::new(&elements).unwrap();

        for cursor in 0..n {
            assert_eq!(source.position(), cursor);
            assert!(source.has_more());
            source.fetch().unwrap();
        }
        assert!(!source.has_more());

        source.reset().unwrap();
        assert_eq!(source.has_more(), n > 0);
    }
}

#[test]
fn test_fetch_order_survives_rewind() {
    let elements: Vec<String> = (0..50).map(|i| format!("element_{i}")).collect();
    let mut source = ArraySource::new(&elements).unwrap();

    let first: Result<Vec<String>, SourceError> = source.elements().collect();
    assert_eq!(first.unwrap(), elements);
    assert_eq!(source.fetch(), Err(SourceError::Exhausted));

    source.reset().unwrap();
    let second: Result<Vec<String>, SourceError> = source.elements().collect();
    assert_eq!(second.unwrap(), elements);
}

#[test]
fn test_capacity_growth_sequence() {
    for &start in &[1usize, 4, 7, 64] {
        let initial = vec![0u32; start];
        let mut source = ArraySource::new(&initial).unwrap();
        let mut expected_capacity = start;

        for appended in 1..=8 * start {
            let length_before = source.len();
            source.append(appended as u32).unwrap();
            if length_before == expected_capacity {
                expected_capacity *= 2;
            }
            assert_eq!(
                source.capacity(),
                expected_capacity,
                "start {start}, after {appended} appends"
            );
        }
        assert_eq!(source.capacity(), 16 * start);
        assert_eq!(source.len(), 9 * start);
    }
}

#[test]
fn test_growth_factor_three() {
    let config = ArrayConfig::default().with_growth_factor(3);
    let mut source = ArraySource::with_config(&[1u8, 2], config).unwrap();

    for value in 3..=7 {
        source.append(value).unwrap();
    }
    // 2 -> 6 on the third element, 6 -> 18 on the seventh.
    assert_eq!(source.capacity(), 18);
    assert_eq!(source.fetch_batch(10).unwrap(), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_batch_returns_min_of_count_and_remaining() {
    let elements: Vec<i64> = (0..40).collect();
    let mut source = ArraySource::new(&elements).unwrap();

    let mut consumed = 0usize;
    for count in [0usize, 1, 3, 7, 0, 13, 50, 5] {
        let remaining = elements.len() - consumed;
        let batch = source.fetch_batch(count).unwrap();
        assert_eq!(batch.len(), count.min(remaining));
        assert_eq!(batch, elements[consumed..consumed + batch.len()].to_vec());
        consumed += batch.len();
        assert_eq!(source.remaining(), elements.len() - consumed);
    }
    assert!(!source.has_more());
}

#[test]
fn test_step_back_refetches_previous_element() {
    let mut source = ArraySource::new(&[3, 1, 4]).unwrap();
    assert_eq!(source.fetch(), Ok(3));
    assert_eq!(source.fetch(), Ok(1));

    assert_eq!(source.step_back_keep(), 2);
    assert_eq!(source.fetch(), Ok(1));
    assert_eq!(source.fetch(), Ok(4));

    source.step_back().step_back().step_back().step_back();
    assert_eq!(source.position(), 0);
    assert_eq!(source.len(), 3);
}

#[test]
fn test_extract_chain_reads_consecutive_elements() {
    let mut source = ArraySource::new(&[1, 2, 3, 4, 5, 6]).unwrap();
    let (mut a, mut b, mut c) = (25, 36, 0);

    source
        .extract(&mut a)
        .and_then(|s| s.extract(&mut b))
        .and_then(|s| s.extract(&mut c))
        .unwrap();
    assert_eq!((a, b, c), (1, 2, 3));

    let mut next = source.caller();
    assert_eq!(next(), Ok(4));
}
