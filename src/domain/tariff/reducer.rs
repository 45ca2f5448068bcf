//! Most-recent-record reduction

use std::collections::HashMap;

use super::model::ProductPriceRecord;

/// Keep one record per code: the one with the latest fetch date.
///
/// Codes keep the order of their first appearance.
pub fn dedupe_by_code(records: Vec<ProductPriceRecord>) -> Vec<ProductPriceRecord> {
    let mut slot_of: HashMap<String, usize> = HashMap::new();
    let mut latest: Vec<ProductPriceRecord> = Vec::new();

    for record in records {
        match slot_of.get(&record.hts_code) {
            Some(&slot) => {
                if record.fetch_date > latest[slot].fetch_date {
                    latest[slot] = record;
                }
            }
            None => {
                slot_of.insert(record.hts_code.clone(), latest.len());
                latest.push(record);
            }
        }
    }

    latest
}
