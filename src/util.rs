use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub type Color = [f32; 3];

pub const SYNTHETIC_COLOR: Color = [0.0, 1.0, 0.0];

pub fn stable_color<K: Hash + ?Sized>(key: &K) -> Color {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let channel = |shift: u32| ((hash >> shift) & 0xffff) as f32 / u16::MAX as f32;
    [channel(0), channel(16), channel(32)]
}

pub fn similarity_color(similarity: f64) -> Color {
    [0.0, 0.0, similarity.clamp(0.0, 1.0) as f32]
}

pub fn cluster_radius(node_count: usize, node_size: f64) -> f64 {
    let n = node_count as f64;
    node_size * n + node_size * n.sqrt()
}
