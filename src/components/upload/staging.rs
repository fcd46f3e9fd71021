//! 上传暂存集合（纯逻辑）
//!
//! 配额检查是原子的：一个批次要么整体进入暂存集，要么整体被拒，
//! 绝不部分接受。与 DOM 解耦以便原生测试。

/// 能报告自身字节大小的对象（生产为 gloo 的 `File`，测试为桩）
pub trait ByteSize {
    fn size_bytes(&self) -> u64;
}

impl ByteSize for gloo_file::File {
    fn size_bytes(&self) -> u64 {
        self.size()
    }
}

/// 暂存批次超出配额
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaExceeded {
    pub quota: u64,
}

impl std::fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total file size exceeds {} MB.",
            self.quota / (1024 * 1024)
        )
    }
}

impl std::error::Error for QuotaExceeded {}

/// 带软配额的暂存集合
#[derive(Debug, Clone)]
pub struct StagedSet<T> {
    items: Vec<T>,
    quota: u64,
}

impl<T: ByteSize> StagedSet<T> {
    pub fn new(quota: u64) -> Self {
        Self {
            items: Vec::new(),
            quota,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.items.iter().map(|item| item.size_bytes()).sum()
    }

    /// 原子地暂存一个批次：超出配额时整批拒绝，已暂存集合不变
    pub fn try_stage(&mut self, incoming: Vec<T>) -> Result<(), QuotaExceeded> {
        let added: u64 = incoming.iter().map(|item| item.size_bytes()).sum();
        if self.total_bytes() + added > self.quota {
            return Err(QuotaExceeded { quota: self.quota });
        }
        self.items.extend(incoming);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
