//! dg-export: Tiled map export for generated dungeons
//!
//! Writes a [`LayerSet`] as a Tiled JSON map with one tile layer per
//! [`LayerKind`], and reads such maps back.
//!
//! Tile codes are atlas indices, so a cell's gid is `code + firstgid`. Tiled
//! reads gid 0 as "no tile": overlay layers keep [`EMPTY`] as gid 0, while
//! in the ground, floor and walls layers code 0 is a real tile (the
//! top-left outer wall corner) and is offset like every other code.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use dg_core::{EMPTY, LayerKind, LayerSet, TileCode};

/// Tiled JSON format version written into maps
pub const TILED_FORMAT_VERSION: &str = "1.10";

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Layer {layer} has {found} tiles, expected {expected}")]
    LayerShape {
        layer: String,
        expected: usize,
        found: usize,
    },

    #[error("Missing layer: {0}")]
    MissingLayer(String),

    #[error("Unsupported map: {0}")]
    UnsupportedMap(String),
}

/// The tileset atlas the codes index into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetInfo {
    pub name: String,
    /// Image path, relative to the map file
    pub image: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub tile_count: u32,
    pub first_gid: u32,
}

impl Default for TilesetInfo {
    fn default() -> Self {
        Self {
            name: "Dungeon_Tileset".to_string(),
            image: "tileset/Dungeon_Tileset.png".to_string(),
            tile_width: 32,
            tile_height: 32,
            columns: 16,
            tile_count: 176,
            first_gid: 1,
        }
    }
}

impl TilesetInfo {
    fn rows(&self) -> u32 {
        self.tile_count.div_ceil(self.columns.max(1))
    }
}

/// A Tiled JSON map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledMap {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub orientation: String,
    pub renderorder: String,
    pub infinite: bool,
    pub width: usize,
    pub height: usize,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub nextlayerid: u32,
    pub nextobjectid: u32,
    pub layers: Vec<TiledLayer>,
    pub tilesets: Vec<TiledTileset>,
}

/// One tile layer of a Tiled map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledLayer {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub width: usize,
    pub height: usize,
    pub x: i32,
    pub y: i32,
    pub opacity: f32,
    pub visible: bool,
    /// Row-major gids
    pub data: Vec<u32>,
}

/// Embedded tileset entry of a Tiled map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledTileset {
    pub firstgid: u32,
    pub name: String,
    pub image: String,
    pub imagewidth: u32,
    pub imageheight: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    pub tilecount: u32,
    pub columns: u32,
    #[serde(default)]
    pub margin: u32,
    #[serde(default)]
    pub spacing: u32,
}

impl From<&TilesetInfo> for TiledTileset {
    fn from(info: &TilesetInfo) -> Self {
        Self {
            firstgid: info.first_gid,
            name: info.name.clone(),
            image: info.image.clone(),
            imagewidth: info.columns * info.tile_width,
            imageheight: info.rows() * info.tile_height,
            tilewidth: info.tile_width,
            tileheight: info.tile_height,
            tilecount: info.tile_count,
            columns: info.columns,
            margin: 0,
            spacing: 0,
        }
    }
}

/// Layers whose `EMPTY` cells mean "no tile"
fn is_overlay(kind: LayerKind) -> bool {
    matches!(kind, LayerKind::Decals | LayerKind::Upper | LayerKind::Leaves)
}

/// Gid written for a tile code
pub fn code_to_gid(kind: LayerKind, code: TileCode, first_gid: u32) -> u32 {
    if is_overlay(kind) && code == EMPTY {
        0
    } else {
        u32::from(code) + first_gid
    }
}

/// Tile code for a gid read back from a map
pub fn gid_to_code(kind: LayerKind, gid: u32, first_gid: u32) -> Option<TileCode> {
    if is_overlay(kind) && gid == 0 {
        return Some(EMPTY);
    }
    gid.checked_sub(first_gid)
        .and_then(|index| TileCode::try_from(index).ok())
}

/// Build a Tiled map from generated layers
pub fn to_tiled(layers: &LayerSet, tileset: &TilesetInfo) -> TiledMap {
    let (width, height) = (layers.width(), layers.height());

    let tiled_layers: Vec<TiledLayer> = layers
        .iter()
        .enumerate()
        .map(|(i, (kind, layer))| TiledLayer {
            id: i as u32 + 1,
            name: kind.to_string(),
            kind: "tilelayer".to_string(),
            width,
            height,
            x: 0,
            y: 0,
            opacity: 1.0,
            visible: true,
            data: layer
                .cells()
                .iter()
                .map(|&code| code_to_gid(kind, code, tileset.first_gid))
                .collect(),
        })
        .collect();

    TiledMap {
        kind: "map".to_string(),
        version: TILED_FORMAT_VERSION.to_string(),
        orientation: "orthogonal".to_string(),
        renderorder: "right-down".to_string(),
        infinite: false,
        width,
        height,
        tilewidth: tileset.tile_width,
        tileheight: tileset.tile_height,
        nextlayerid: tiled_layers.len() as u32 + 1,
        nextobjectid: 1,
        layers: tiled_layers,
        tilesets: vec![TiledTileset::from(tileset)],
    }
}

impl TiledMap {
    /// Find a layer by name
    pub fn layer(&self, name: &str) -> Option<&TiledLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Rebuild the six generator layers
    ///
    /// Every layer must be present under its kind's name and hold exactly
    /// `width * height` gids that map back to a tile code through the first
    /// tileset's `firstgid`.
    pub fn to_layer_set(&self) -> Result<LayerSet, ExportError> {
        if self.orientation != "orthogonal" {
            return Err(ExportError::UnsupportedMap(format!(
                "{} orientation",
                self.orientation
            )));
        }
        if self.infinite {
            return Err(ExportError::UnsupportedMap("infinite map".to_string()));
        }

        let first_gid = self
            .tilesets
            .first()
            .map(|t| t.firstgid)
            .ok_or_else(|| ExportError::UnsupportedMap("no tileset".to_string()))?;

        let expected = self.width * self.height;
        let mut layers = LayerSet::new(self.width, self.height);

        for kind in LayerKind::iter() {
            let name = kind.to_string();
            let tiled = self
                .layer(&name)
                .ok_or_else(|| ExportError::MissingLayer(name.clone()))?;
            if tiled.data.len() != expected {
                return Err(ExportError::LayerShape {
                    layer: name,
                    expected,
                    found: tiled.data.len(),
                });
            }

            let target = layers.layer_mut(kind);
            for (i, &gid) in tiled.data.iter().enumerate() {
                let code = gid_to_code(kind, gid, first_gid).ok_or_else(|| {
                    ExportError::UnsupportedMap(format!("gid {gid} in layer {name}"))
                })?;
                target.set(i % self.width, i / self.width, code);
            }
        }

        Ok(layers)
    }
}

/// Serialize a map to a pretty JSON string
pub fn to_json_string(map: &TiledMap) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(map)?)
}

/// Save a map as pretty-printed JSON
pub fn save_tiled(map: &TiledMap, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, map)?;
    Ok(())
}

/// Save a map as compact JSON (no pretty printing)
pub fn save_tiled_compact(map: &TiledMap, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, map)?;
    Ok(())
}

/// Load a map from a JSON file
pub fn load_tiled(path: impl AsRef<Path>) -> Result<TiledMap, ExportError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::dungeon::WallTile;
    use dg_core::{GROUND, generate_seeded};
    use tempfile::TempDir;

    #[test]
    fn test_to_tiled_layout() {
        let dungeon = generate_seeded(12, 9, 42);
        let map = to_tiled(&dungeon.layers, &TilesetInfo::default());

        assert_eq!((map.width, map.height), (12, 9));
        assert_eq!((map.tilewidth, map.tileheight), (32, 32));
        let names: Vec<&str> = map.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["Ground", "Floor", "Walls", "Decals", "Upper", "Leaves"]
        );
        for layer in &map.layers {
            assert_eq!(layer.data.len(), 12 * 9);
            assert_eq!(layer.kind, "tilelayer");
        }
        assert_eq!(map.layers[0].data[0], u32::from(GROUND) + 1);
        assert!(map.layers[3].data.iter().all(|&gid| gid == 0));
        assert_eq!(map.nextlayerid, 7);

        let tileset = &map.tilesets[0];
        assert_eq!(tileset.firstgid, 1);
        assert_eq!(tileset.image, "tileset/Dungeon_Tileset.png");
        assert_eq!((tileset.imagewidth, tileset.imageheight), (512, 352));
    }

    #[test]
    fn test_gids_offset_by_first_gid() {
        assert_eq!(code_to_gid(LayerKind::Walls, WallTile::LeftUp.code(), 1), 1);
        assert_eq!(code_to_gid(LayerKind::Ground, GROUND, 1), 140);
        assert_eq!(code_to_gid(LayerKind::Upper, EMPTY, 1), 0);
        assert_eq!(code_to_gid(LayerKind::Upper, 5, 1), 6);

        assert_eq!(gid_to_code(LayerKind::Walls, 1, 1), Some(WallTile::LeftUp.code()));
        assert_eq!(gid_to_code(LayerKind::Walls, 0, 1), None);
        assert_eq!(gid_to_code(LayerKind::Leaves, 0, 1), Some(EMPTY));
        assert_eq!(gid_to_code(LayerKind::Floor, 70_000, 1), None);
    }

    #[test]
    fn test_left_up_corner_survives_export() {
        let dungeon = (0..64)
            .map(|seed| generate_seeded(40, 30, seed))
            .find(|d| d.layers.walls.cells().contains(&WallTile::LeftUp.code()))
            .expect("some seed places an outer top-left corner");
        let map = to_tiled(&dungeon.layers, &TilesetInfo::default());

        let walls = map.layer("Walls").unwrap();
        for (i, &code) in dungeon.layers.walls.cells().iter().enumerate() {
            assert_ne!(walls.data[i], 0, "cell {i} (code {code}) exported as no tile");
            if code == WallTile::LeftUp.code() {
                assert_eq!(walls.data[i], 1);
            }
        }
        assert_eq!(map.to_layer_set().unwrap(), dungeon.layers);
    }

    #[test]
    fn test_custom_first_gid_round_trip() {
        let dungeon = generate_seeded(16, 12, 6);
        let tileset = TilesetInfo {
            first_gid: 33,
            ..TilesetInfo::default()
        };
        let map = to_tiled(&dungeon.layers, &tileset);
        assert_eq!(map.layers[0].data[0], u32::from(GROUND) + 33);
        assert_eq!(map.to_layer_set().unwrap(), dungeon.layers);
    }

    #[test]
    fn test_json_field_names() {
        let dungeon = generate_seeded(6, 6, 1);
        let map = to_tiled(&dungeon.layers, &TilesetInfo::default());
        let json = to_json_string(&map).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "map");
        assert_eq!(value["orientation"], "orthogonal");
        assert_eq!(value["renderorder"], "right-down");
        assert_eq!(value["layers"][2]["name"], "Walls");
        assert_eq!(value["layers"][2]["type"], "tilelayer");
        assert_eq!(value["tilesets"][0]["name"], "Dungeon_Tileset");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let dungeon = generate_seeded(20, 15, 9);
        let map = to_tiled(&dungeon.layers, &TilesetInfo::default());

        let pretty = dir.path().join("map.json");
        save_tiled(&map, &pretty).unwrap();
        let loaded = load_tiled(&pretty).unwrap();
        assert_eq!(loaded, map);
        assert_eq!(loaded.to_layer_set().unwrap(), dungeon.layers);

        let compact = dir.path().join("map.min.json");
        save_tiled_compact(&map, &compact).unwrap();
        let compact_len = std::fs::metadata(&compact).unwrap().len();
        let pretty_len = std::fs::metadata(&pretty).unwrap().len();
        assert!(compact_len < pretty_len);
        assert_eq!(load_tiled(&compact).unwrap(), map);
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_tiled("/nonexistent/path/map.json");
        assert!(matches!(result, Err(ExportError::Io(_))));
    }

    #[test]
    fn test_load_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not a map").unwrap();
        assert!(matches!(
            load_tiled(&path),
            Err(ExportError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_layer() {
        let dungeon = generate_seeded(8, 8, 2);
        let mut map = to_tiled(&dungeon.layers, &TilesetInfo::default());
        map.layers.retain(|l| l.name != "Decals");

        match map.to_layer_set() {
            Err(ExportError::MissingLayer(name)) => assert_eq!(name, "Decals"),
            other => panic!("expected missing layer, got {other:?}"),
        }
    }

    #[test]
    fn test_layer_shape_mismatch() {
        let dungeon = generate_seeded(8, 8, 2);
        let mut map = to_tiled(&dungeon.layers, &TilesetInfo::default());
        map.layers[1].data.pop();

        assert!(matches!(
            map.to_layer_set(),
            Err(ExportError::LayerShape {
                expected: 64,
                found: 63,
                ..
            })
        ));
    }

    #[test]
    fn test_unsupported_maps() {
        let dungeon = generate_seeded(8, 8, 2);
        let map = to_tiled(&dungeon.layers, &TilesetInfo::default());

        let mut iso = map.clone();
        iso.orientation = "isometric".to_string();
        assert!(matches!(
            iso.to_layer_set(),
            Err(ExportError::UnsupportedMap(_))
        ));

        let mut no_tileset = map.clone();
        no_tileset.tilesets.clear();
        assert!(matches!(
            no_tileset.to_layer_set(),
            Err(ExportError::UnsupportedMap(_))
        ));

        let mut blank = map.clone();
        blank.layers[2].data[0] = 0;
        assert!(matches!(
            blank.to_layer_set(),
            Err(ExportError::UnsupportedMap(_))
        ));

        let mut huge = map;
        huge.layers[0].data[0] = 70_000;
        assert!(matches!(
            huge.to_layer_set(),
            Err(ExportError::UnsupportedMap(_))
        ));
    }
}
