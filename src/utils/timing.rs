use std::time::Instant;

use log::info;

/// Run `f`, logging how long it took under the given name
pub fn report_time<T, F: FnOnce() -> T>(name: &str, f: F) -> T {
    let start = Instant::now();

    let result = f();

    info!("{} finished in {:.3?}", name, start.elapsed());

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_the_wrapped_result() {
        assert_eq!(report_time("sum", || 2 + 2), 4);
    }
}
