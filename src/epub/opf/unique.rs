//! 去重列表
//!
//! 保持插入顺序的列表，用哈希集合做重复检查。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::hash::Hash;
use std::ops::Deref;

/// 按结构相等去重、保持插入顺序的列表
#[derive(Debug, Clone)]
pub struct UniqueList<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> UniqueList<T> {
    /// 创建空列表
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// 追加一个值，已存在相等的值时不做任何事
    ///
    /// # 返回值
    /// * `bool` - 是否实际追加
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Eq + Hash + Clone> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for UniqueList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> PartialEq for UniqueList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for UniqueList<T> {}

impl<T: Hash> Hash for UniqueList<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for UniqueList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.insert(value);
        }
        list
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for UniqueList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for UniqueList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl<'de, T> Deserialize<'de> for UniqueList<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
