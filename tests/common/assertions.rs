//! Assertion macros with descriptive failure messages.

/// Assert that stdout or stderr contains a substring.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($needle),
            "Expected output to contain '{}'.\nstdout:\n{}\nstderr:\n{}",
            $needle,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that a path exists (or not) under the content directory.
#[macro_export]
macro_rules! assert_exists {
    ($env:expr, $path:expr) => {
        assert!(
            $env.content_path($path).exists(),
            "Expected '{}' to exist under {:?}",
            $path,
            $env.content_dir.path()
        );
    };
    ($env:expr, $path:expr, absent) => {
        assert!(
            !$env.content_path($path).exists(),
            "Expected '{}' to be removed from {:?}",
            $path,
            $env.content_dir.path()
        );
    };
}
