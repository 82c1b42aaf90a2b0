//! Key hashing and the bucket tier table.

/// Bucket counts the table moves through as it grows. Each tier is a
/// prime roughly double the previous one; the last tier is final and the
/// table never grows past it.
pub(crate) const BUCKET_TIERS: [usize; 8] = [509, 1021, 2039, 4093, 8191, 16381, 32749, 65521];

const HASH_MULTIPLIER: usize = 65599;

/// Map `key` to a bucket index in `[0, bucket_count)`.
///
/// Rolling polynomial hash over the key's bytes, accumulated left to
/// right with wrapping arithmetic at the native word width. Pure: equal
/// keys land in the same bucket for a given `bucket_count`, no matter
/// when or how often this is called. The empty string hashes to 0.
pub(crate) fn bucket_index(key: &str, bucket_count: usize) -> usize {
    let mut hash: usize = 0;
    for &b in key.as_bytes() {
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(b as usize);
    }
    hash % bucket_count
}
