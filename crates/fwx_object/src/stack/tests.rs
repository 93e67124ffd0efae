use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_frames_count_and_release() {
    assert_eq!(send_depth(), 0);
    {
        let _outer = SendFrame::enter();
        let _inner = SendFrame::enter();
        assert_eq!(send_depth(), 2);
    }
    assert_eq!(send_depth(), 0);
}

#[test]
fn test_enter_fails_at_limit_without_counting() {
    set_max_send_depth(1);
    let first = SendFrame::enter();
    assert!(first.is_ok());

    let second = SendFrame::enter();
    assert_eq!(
        second.err().map(|e| e.to_string()),
        Some("maximum recursion depth exceeded (limit: 1)".to_string())
    );
    assert_eq!(send_depth(), 1);

    drop(first);
    assert_eq!(send_depth(), 0);
    set_max_send_depth(DEFAULT_MAX_SEND_DEPTH);
}

#[test]
fn test_limit_is_per_thread() {
    set_max_send_depth(3);
    let other = std::thread::spawn(max_send_depth).join().ok();
    assert_eq!(other, Some(DEFAULT_MAX_SEND_DEPTH));
    assert_eq!(max_send_depth(), 3);
    set_max_send_depth(DEFAULT_MAX_SEND_DEPTH);
}
