//! ジャーナル（エントリの順序付き集合）
//!
//! セッションが唯一の所有者。プロセッサは `&Journal` を受け取り、新しい Journal を返す。
//! プロセス全体で共有する可変な Journal は持たない。

use crate::domain::{Category, EntryId, JournalEntry};

/// 挿入順を保つエントリ列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// 指定 ID のエントリだけを取り除く。無ければ None（何もしない）
    pub fn remove(&mut self, id: &EntryId) -> Option<JournalEntry> {
        let pos = self.entries.iter().position(|e| e.id() == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn get(&self, id: &EntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_category(&self, category: Category) -> Vec<&JournalEntry> {
        self.entries
            .iter()
            .filter(|e| e.category() == category)
            .collect()
    }

    /// カテゴリとキーワードで絞り込む
    ///
    /// キーワードは大文字小文字を無視した部分一致で、どれか 1 つに当たれば残す。
    /// 空のキーワード列は絞り込みなしと同じ。
    pub fn query(&self, category: Option<Category>, keywords: &[String]) -> Vec<&JournalEntry> {
        let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        self.entries
            .iter()
            .filter(|e| category.map_or(true, |c| e.category() == c))
            .filter(|e| {
                if needles.is_empty() {
                    return true;
                }
                let content = e.content().to_lowercase();
                needles.iter().any(|n| content.contains(n.as_str()))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a JournalEntry;
    type IntoIter = std::slice::Iter<'a, JournalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<JournalEntry> for Journal {
    fn from_iter<I: IntoIterator<Item = JournalEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
