use summarizer::{setup_cli_logging, setup_logging};

#[test]
fn test_logging_setup() {
    // Both setup functions must tolerate an already-installed subscriber
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        setup_logging();
        setup_cli_logging(true);
    });

    assert!(result.is_ok(), "logging setup should not panic");
}
