//! Reference application: a counter that survives hot swaps.

use crate::error::Result;
use crate::runtime::App;
use crate::state::CapturedState;
use serde_json::Value;

const COUNT_KEY: &str = "count";

/// Running counter instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    count: i64,
}

impl Counter {
    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn increment(&mut self) {
        self.count += 1;
    }

    pub fn decrement(&mut self) {
        self.count -= 1;
    }
}

/// The counter application; `count` starts at 0 unless restored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterApp;

impl App for CounterApp {
    type Instance = Counter;

    fn create(&self, previous: Option<&CapturedState>) -> Result<Counter> {
        let count = previous
            .and_then(|state| state.get(COUNT_KEY))
            .and_then(Value::as_i64)
            .unwrap_or(0);
        Ok(Counter { count })
    }

    fn snapshot(&self, instance: &Counter) -> Result<CapturedState> {
        Ok(CapturedState::new().with(COUNT_KEY, instance.count))
    }

    fn destroy(&self, _instance: Counter) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;

    #[test]
    fn test_defaults_to_zero() {
        let mut runtime = Runtime::new(CounterApp);
        runtime.mount(None).unwrap();
        assert_eq!(runtime.instance().map(Counter::count), Some(0));
    }

    #[test]
    fn test_restores_captured_count() {
        let mut runtime = Runtime::new(CounterApp);
        runtime.mount(None).unwrap();
        for _ in 0..5 {
            runtime.instance_mut().unwrap().increment();
        }

        let state = runtime.capture_state();
        assert_eq!(state, CapturedState::new().with("count", 5));

        runtime.unmount();
        runtime.mount(Some(state)).unwrap();
        assert_eq!(runtime.instance().map(Counter::count), Some(5));
    }

    #[test]
    fn test_ignores_malformed_state() {
        let mut runtime = Runtime::new(CounterApp);
        runtime
            .mount(Some(CapturedState::new().with("count", "five")))
            .unwrap();
        assert_eq!(runtime.instance().map(Counter::count), Some(0));
    }
}
