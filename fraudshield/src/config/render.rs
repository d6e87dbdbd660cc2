use serde::Deserialize;
use serde::Serialize;

/// Look and feel of the network diagrams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub height_px:        u32,
    pub background_color: String,
    pub font_color:       String,
    pub normal_color:     String,
    pub flagged_color:    String,
    pub edge_color:       String,
    pub edge_width:       f64,
    /// Script URL of the vis-network standalone build.
    pub vis_network_url:  String,
    pub physics:          PhysicsConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height_px:        800,
            background_color: "#222222".to_string(),
            font_color:       "white".to_string(),
            normal_color:     "red".to_string(),
            flagged_color:    "yellow".to_string(),
            edge_color:       "white".to_string(),
            edge_width:       0.5,
            vis_network_url:  "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js".to_string(),
            physics:          PhysicsConfig::default(),
        }
    }
}

/// Parameters of the `forceAtlas2Based` solver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity:         f64,
    pub central_gravity: f64,
    pub spring_length:   f64,
    pub spring_strength: f64,
    pub damping:         f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity:         -50.0,
            central_gravity: 0.01,
            spring_length:   300.0,
            spring_strength: 0.005,
            damping:         0.6,
        }
    }
}
