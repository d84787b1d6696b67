// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.
//!
//! Settings are read from a RON file. Missing files and missing fields fall
//! back to defaults, so an empty file is a valid configuration.

use nodeweave_graph::{CanvasInput, Graph, Node};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "nodeweave.ron";

/// Errors while loading or saving the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for [`EditorConfig`]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The configuration could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Initial width (logical pixels)
    pub width: u32,
    /// Initial height (logical pixels)
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Nodeweave".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

/// Pointer input thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Longest gap between the presses of a double click (seconds)
    pub double_click_delay: f64,
    /// Farthest distance between the presses of a double click (points)
    pub double_click_distance: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            double_click_delay: nodeweave_graph::ui::DOUBLE_CLICK_DELAY,
            double_click_distance: nodeweave_graph::ui::DOUBLE_CLICK_DISTANCE,
        }
    }
}

impl InputSettings {
    /// Canvas input translator using these thresholds
    pub fn canvas_input(&self) -> CanvasInput {
        CanvasInput::new(self.double_click_delay, self.double_click_distance)
    }
}

/// A node created when the editor starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSeed {
    /// Display name, also used to refer to the node in `edges`
    pub name: String,
    /// Center position on the canvas
    pub position: [f32; 2],
}

/// The graph the editor opens with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Graph name
    pub name: String,
    /// Nodes to create
    pub nodes: Vec<NodeSeed>,
    /// Edges to create, as `(from, to)` node names
    pub edges: Vec<(String, String)>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        let seed = |name: &str, x: f32, y: f32| NodeSeed {
            name: name.to_string(),
            position: [x, y],
        };

        Self {
            name: "Scene".to_string(),
            nodes: vec![
                seed("Input", 120.0, 160.0),
                seed("Filter", 300.0, 100.0),
                seed("Mix", 300.0, 240.0),
                seed("Output", 480.0, 170.0),
            ],
            edges: vec![("Input".to_string(), "Filter".to_string())],
        }
    }
}

impl SceneSettings {
    /// Build the graph described by these settings.
    ///
    /// Edges naming an unknown node are skipped with a warning.
    pub fn build_graph(&self) -> Graph {
        let mut graph = Graph::new(self.name.clone());
        for seed in &self.nodes {
            graph.add_node(seed.name.clone(), seed.position.into());
        }

        for (from, to) in &self.edges {
            let ids = graph
                .node_by_name(from)
                .map(Node::id)
                .zip(graph.node_by_name(to).map(Node::id));

            match ids {
                Some((from_id, to_id)) => {
                    if let Err(e) = graph.connect(from_id, to_id) {
                        tracing::warn!("Skipping edge {from} -> {to}: {e}");
                    }
                }
                None => tracing::warn!("Skipping edge {from} -> {to}: unknown node"),
            }
        }

        graph
    }
}

/// A simulated object whose properties show up in the inspector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySettings {
    /// Stable owner id used to key tracked properties
    pub id: u64,
    /// Display name
    pub name: String,
    /// Starting altitude
    pub altitude: f32,
    /// Spring stiffness pulling the altitude back to zero
    pub stiffness: f32,
}

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Main window
    pub window: WindowSettings,
    /// Default `tracing` filter directive (`RUST_LOG` takes precedence)
    pub log_filter: String,
    /// Pointer input thresholds
    pub input: InputSettings,
    /// Initial graph
    pub scene: SceneSettings,
    /// Simulated bodies
    pub bodies: Vec<BodySettings>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            log_filter: "nodeweave_editor_app=debug,nodeweave_graph=debug".to_string(),
            input: InputSettings::default(),
            scene: SceneSettings::default(),
            bodies: vec![
                BodySettings {
                    id: 1,
                    name: "Probe".to_string(),
                    altitude: 10.0,
                    stiffness: 1.0,
                },
                BodySettings {
                    id: 2,
                    name: "Buoy".to_string(),
                    altitude: 4.0,
                    stiffness: 3.0,
                },
            ],
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from RON text
    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Serialize the configuration to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load the configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Load the configuration, or use defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save the configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}
