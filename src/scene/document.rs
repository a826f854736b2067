//! Fragments of the renderer's scene document shared by several scenes.

use serde_json::{Value as Json, json};

/// `(x, size, diffuse)` of the planets lined up along the x axis at `y = 3`.
const PLANET_ROW: [(f64, f64, [f64; 3]); 8] = [
    (-15.0, 0.5, [0.11, 0.11, 0.11]),
    (-12.0, 1.3, [0.9, 0.9, 0.9]),
    (-9.0, 1.3, [0.19, 0.42, 0.41]),
    (-4.0, 0.7, [0.6, 0.24, 0.0]),
    (7.0, 8.0, [0.69, 0.5, 0.21]),
    (22.0, 6.0, [0.69, 0.56, 0.21]),
    (35.0, 5.0, [0.34, 0.5, 0.67]),
    (46.0, 5.0, [0.21, 0.41, 0.59]),
];

/// A sphere surface centred at `origin`.
pub(crate) fn sphere(origin: Json, size: f64, material: Json) -> Json {
    json!({
        "frame": { "o": origin },
        "size": size,
        "material": material,
    })
}

pub(crate) fn planet_row() -> Vec<Json> {
    PLANET_ROW
        .iter()
        .map(|&(x, size, kd)| sphere(json!([x, 3.0, 0.0]), size, json!({ "kd": kd })))
        .collect()
}

pub(crate) fn directional_light(direction: [f64; 3], intensity: [f64; 3]) -> Json {
    json!({
        "type": "direction",
        "frame": { "z": direction },
        "intensity": intensity,
    })
}

/// Camera, planet row and a single sun light; the document used by the fly-by scenes.
pub(crate) fn planet_scene(eye: Json, target: Json) -> Json {
    json!({
        "camera": { "eye": eye, "target": target },
        "surfaces": planet_row(),
        "lights": [directional_light([-1.0, -1.0, 0.0], [2.0, 2.0, 2.0])],
    })
}
