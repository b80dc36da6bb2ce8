//! SortableId を生成する IdGenerator の標準実装（Clock + シーケンス）
//!
//! 形式: base62(0-9,A-Z,a-z) 8文字。値 = (ms since 2020-01-01)<<8 | seq(0..255)。辞書順＝数値順。
//! 同一 ms 内で seq を使い切ったら次の ms の値に繰り上げる（単調増加を優先）。

use crate::domain::SortableId;
use crate::ports::outbound::{Clock, IdGenerator};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const EPOCH_MS: u64 = 1577836800000; // 2020-01-01 00:00:00 UTC
const SEQ_BITS: u64 = 8;
const BASE: u64 = 62;
const WIDTH: usize = 8;
const MAX_VAL: u64 = BASE.pow(WIDTH as u32) - 1;

/// 0-9, A-Z, a-z の順で辞書順＝数値順になるbase62
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Clock + シーケンスで SortableId を生成する標準実装
pub struct StdIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicU64,
}

impl StdIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> SortableId {
        let ms_rel = self.clock.now_ms().saturating_sub(EPOCH_MS);
        let base = (ms_rel << SEQ_BITS).min(MAX_VAL);

        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            // 時刻が進んでいれば seq 0 から、そうでなければ直前 +1
            let next = if base > prev { base } else { (prev + 1).min(MAX_VAL) };
            match self
                .last
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return SortableId::new(to_base62(next)),
                Err(actual) => prev = actual,
            }
        }
    }
}

fn to_base62(mut n: u64) -> String {
    let mut buf = [0u8; WIDTH];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    buf.iter().map(|&b| b as char).collect()
}
