//! Escritura y relectura del snapshot de mercado en disco.

use fin_persistence::{ensure_market_file, FileMarketData};
use fin_providers::seed::sample_snapshot;
use fin_providers::MarketDataProvider;

#[test]
fn test_market_file_roundtrip_preserves_snapshot() {
    let path = std::env::temp_dir().join(format!("finflow_market_{}.json", std::process::id()));
    let path_str = path.to_string_lossy().to_string();
    let _ = std::fs::remove_file(&path);

    assert!(ensure_market_file(&path_str).expect("primera escritura"));
    assert!(!ensure_market_file(&path_str).expect("segunda pasada sin escritura"));

    let snapshot = FileMarketData::new(&path_str).fetch().expect("relectura");
    assert_eq!(&snapshot, sample_snapshot());

    let _ = std::fs::remove_file(&path);
}
