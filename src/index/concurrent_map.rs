use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Map sharded into independently locked buckets, so rayon workers touching
/// different keys rarely contend.
pub struct ConcurrentMap<K, V> {
    buckets: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Ord + Hash,
{
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        ConcurrentMap {
            buckets: (0..bucket_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    fn bucket(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let idx = (hasher.finish() % self.buckets.len() as u64) as usize;
        &self.buckets[idx]
    }

    /// Apply `f` to the value under `key`, inserting `V::default()` first if absent.
    pub fn update<F>(&self, key: K, f: F)
    where
        V: Default,
        F: FnOnce(&mut V),
    {
        let mut bucket = self.bucket(&key).lock();
        f(bucket.entry(key).or_default());
    }

    pub fn erase(&self, key: &K) -> Option<V> {
        self.bucket(key).lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge all buckets into one ordered map.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for bucket in self.buckets {
            merged.append(&mut bucket.into_inner());
        }
        merged
    }
}
