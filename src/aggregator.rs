// aggregator.rs - 记录汇总
//! 按路径去重的有序记录集合：同一路径再次加入时原位替换

use std::collections::HashMap;

use crate::models::LiteratureRecord;

#[derive(Debug, Default, Clone)]
pub struct RecordAggregator {
    records: Vec<LiteratureRecord>,
    /// 路径 -> records 中的下标
    positions: HashMap<String, usize>,
}

impl RecordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或替换；返回被替换掉的旧记录
    pub fn add(&mut self, record: LiteratureRecord) -> Option<LiteratureRecord> {
        match self.positions.get(&record.path) {
            Some(&idx) => Some(std::mem::replace(&mut self.records[idx], record)),
            None => {
                self.positions.insert(record.path.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    /// 按插入顺序返回全部记录
    pub fn all(&self) -> &[LiteratureRecord] {
        &self.records
    }

    pub fn get(&self, path: &str) -> Option<&LiteratureRecord> {
        self.positions.get(path).map(|&idx| &self.records[idx])
    }

    pub fn remove(&mut self, path: &str) -> Option<LiteratureRecord> {
        let idx = self.positions.remove(path)?;
        let removed = self.records.remove(idx);
        for pos in self.positions.values_mut() {
            if *pos > idx {
                *pos -= 1;
            }
        }
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<LiteratureRecord> {
        self.records
    }
}

impl Extend<LiteratureRecord> for RecordAggregator {
    fn extend<I: IntoIterator<Item = LiteratureRecord>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

impl FromIterator<LiteratureRecord> for RecordAggregator {
    fn from_iter<I: IntoIterator<Item = LiteratureRecord>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(iter);
        aggregator
    }
}
