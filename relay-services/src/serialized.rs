//! Serialized access to a symbol source
//!
//! Some terminal clients cannot take concurrent calls. Wrapping the source
//! in [`SerializedSource`] funnels every call from every connection through
//! one async lock, so at most one call is in flight at a time.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use relay_core::{RelayResult, SymbolInfo, SymbolSource, SymbolTick};
use tokio::sync::Mutex;
use tracing::debug;

/// Symbol source wrapper allowing one call at a time
pub struct SerializedSource {
    inner: Arc<dyn SymbolSource>,
    /// Held for the duration of every call into `inner`
    gate: Mutex<()>,
    /// Counter for debugging - calls forwarded to the inner source
    total_calls: AtomicU64,
}

impl SerializedSource {
    /// Wrap a source
    pub fn new(inner: Arc<dyn SymbolSource>) -> Self {
        Self {
            inner,
            gate: Mutex::new(()),
            total_calls: AtomicU64::new(0),
        }
    }

    /// Number of lookups forwarded so far
    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SymbolSource for SerializedSource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn initialize(&self) -> RelayResult<()> {
        let _guard = self.gate.lock().await;
        self.inner.initialize().await
    }

    async fn shutdown(&self) {
        let _guard = self.gate.lock().await;
        self.inner.shutdown().await
    }

    async fn symbol_info(&self, symbol: &str) -> RelayResult<Option<SymbolInfo>> {
        let _guard = self.gate.lock().await;
        let call = self.total_calls.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("[SERIALIZED:{}] #{} symbol_info({})", self.inner.name(), call, symbol);
        self.inner.symbol_info(symbol).await
    }

    async fn symbol_info_tick(&self, symbol: &str) -> RelayResult<Option<SymbolTick>> {
        let _guard = self.gate.lock().await;
        let call = self.total_calls.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("[SERIALIZED:{}] #{} symbol_info_tick({})", self.inner.name(), call, symbol);
        self.inner.symbol_info_tick(symbol).await
    }
}

impl std::fmt::Debug for SerializedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedSource")
            .field("inner", &self.inner.name())
            .field("total_calls", &self.total_calls())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Source that records how many calls overlap
    #[derive(Default)]
    struct OverlapProbe {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl OverlapProbe {
        async fn enter(&self) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SymbolSource for OverlapProbe {
        fn name(&self) -> &str {
            "probe"
        }

        async fn initialize(&self) -> RelayResult<()> {
            Ok(())
        }

        async fn shutdown(&self) {}

        async fn symbol_info(&self, _symbol: &str) -> RelayResult<Option<SymbolInfo>> {
            self.enter().await;
            Ok(None)
        }

        async fn symbol_info_tick(&self, _symbol: &str) -> RelayResult<Option<SymbolTick>> {
            self.enter().await;
            Ok(None)
        }
    }

    async fn run_concurrently(source: Arc<dyn SymbolSource>) {
        let mut handles = Vec::new();
        for i in 0..5 {
            let source = Arc::clone(&source);
            handles.push(tokio::spawn(async move {
                let symbol = format!("SYM{}", i);
                source.symbol_info(&symbol).await.unwrap();
                source.symbol_info_tick(&symbol).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_calls_never_overlap() {
        let probe = Arc::new(OverlapProbe::default());
        let serialized = Arc::new(SerializedSource::new(probe.clone()));

        run_concurrently(serialized.clone()).await;

        assert_eq!(probe.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(serialized.total_calls(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_unwrapped_calls_overlap() {
        let probe = Arc::new(OverlapProbe::default());

        run_concurrently(probe.clone()).await;

        assert!(probe.max_in_flight.load(Ordering::SeqCst) > 1);
    }

    #[test]
    fn test_name_passthrough() {
        let serialized = SerializedSource::new(Arc::new(OverlapProbe::default()));
        assert_eq!(serialized.name(), "probe");
    }
}
