use eframe::egui::{Vec2, vec2};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankedRecord {
    pub address: String,
    pub percentage_share: f32,
    pub balance: Option<String>,
    pub tag: Option<String>,
    pub transaction_count: Option<u64>,
    pub connections: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: usize,
    pub address: String,
    pub percentage_share: f32,
    pub balance: Option<String>,
    pub tag: Option<String>,
    pub transaction_count: Option<u64>,
    pub position: Vec2,
    pub ring_position: Vec2,
    pub connections: Vec<usize>,
}

impl Entity {
    pub fn radius(&self, layout: &LayoutConfig) -> f32 {
        layout.bubble_radius(self.percentage_share)
    }
}

#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub center: Vec2,
    pub slot_count_floor: usize,
    pub ring_steps: [(f32, f32); 3],
    pub outer_ring_radius: f32,
    pub jitter_extent: f32,
    pub radius_base: f32,
    pub radius_slope: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub bucket_thresholds: [f32; 5],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center: vec2(400.0, 300.0),
            slot_count_floor: 8,
            ring_steps: [(20.0, 50.0), (10.0, 100.0), (5.0, 150.0)],
            outer_ring_radius: 200.0,
            jitter_extent: 25.0,
            radius_base: 15.0,
            radius_slope: 2.0,
            min_radius: 15.0,
            max_radius: 60.0,
            bucket_thresholds: [20.0, 10.0, 5.0, 2.0, 1.0],
        }
    }
}

impl LayoutConfig {
    pub fn bubble_radius(&self, percentage_share: f32) -> f32 {
        (self.radius_base + (self.radius_slope * percentage_share))
            .clamp(self.min_radius, self.max_radius)
    }

    pub fn ring_radius(&self, percentage_share: f32) -> f32 {
        for &(threshold, ring_radius) in &self.ring_steps {
            if percentage_share > threshold {
                return ring_radius;
            }
        }
        self.outer_ring_radius
    }

    pub fn color_bucket(&self, percentage_share: f32) -> usize {
        for (bucket, &threshold) in self.bucket_thresholds.iter().enumerate() {
            if percentage_share > threshold {
                return bucket;
            }
        }
        self.bucket_thresholds.len()
    }
}
