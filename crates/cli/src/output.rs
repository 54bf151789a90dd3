//! Terminal output: alerts and result rendering

use colored::Colorize;
use paijob_core::port::Notifier;
use serde_json::{Map, Value};
use tabled::{Table, Tabled};

/// Alerts go to stderr so stdout stays pipeable
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", "⚠".red().bold(), message.red());
    }
}

#[derive(Tabled)]
struct VirtualClusterRow {
    #[tabled(rename = "VIRTUAL CLUSTER")]
    name: String,
}

pub fn virtual_cluster_table(vcs: &[String]) -> String {
    let rows = vcs.iter().map(|name| VirtualClusterRow { name: name.clone() });
    Table::new(rows).to_string()
}

pub fn sku_types_json(skus: &Map<String, Value>) -> String {
    serde_json::to_string_pretty(skus).unwrap_or_else(|_| format!("{:?}", skus))
}

pub fn reauth_hint() {
    eprintln!(
        "{}",
        "Session expired or unauthorized. Run `paijob login` to sign in again.".yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_virtual_cluster_table_lists_names() {
        let table = virtual_cluster_table(&["default".to_string(), "vc1".to_string()]);
        assert!(table.contains("VIRTUAL CLUSTER"));
        assert!(table.contains("default"));
        assert!(table.contains("vc1"));
    }

    #[test]
    fn test_sku_types_json_is_pretty() {
        let mut skus = Map::new();
        skus.insert("K80".to_string(), json!({"gpu": 1}));
        let out = sku_types_json(&skus);
        assert!(out.contains("\"K80\""));
        assert!(out.contains('\n'));
    }
}
