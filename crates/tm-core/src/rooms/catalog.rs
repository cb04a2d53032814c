//! Built-in room template catalog

use super::template::{Layout, RoomTemplate};

/// `(name, rows, min, max, weight)` of every built-in template
const BUILTIN: &[(&str, &[&str], usize, usize, usize)] = &[
    (
        "basic3x3",
        &["zxxxz", "x000x", "x000x", "x000x", "zxxxz"],
        2,
        5,
        10,
    ),
    (
        "basic2x3",
        &["zxxz", "x00x", "x00x", "x00x", "zxxz"],
        3,
        6,
        15,
    ),
    (
        "L_shaped",
        &["zxxxz", "x000x", "zxz0x", "aax0x", "aazxz"],
        1,
        3,
        8,
    ),
    (
        "large4x4",
        &[
            "zxxxxz", "x0000x", "x0000x", "x0000x", "x0000x", "zxxxxz",
        ],
        0,
        2,
        5,
    ),
    ("corridor3", &["zxxxz", "x000x", "zxxxz"], 2, 4, 12),
    (
        "T_shaped",
        &["zxxxz", "x000x", "zx0xz", "ax0xa", "azxza"],
        0,
        2,
        6,
    ),
];

/// The built-in templates, every one rotatable. Malformed entries are
/// logged and skipped.
pub fn builtin_templates() -> Vec<RoomTemplate> {
    BUILTIN
        .iter()
        .filter_map(|&(name, rows, min, max, weight)| match Layout::parse(rows) {
            Ok(layout) => Some(
                RoomTemplate::new(name, layout)
                    .with_rotation(true)
                    .with_frequency(min, max)
                    .with_weight(weight),
            ),
            Err(err) => {
                tracing::error!(template = name, %err, "built-in template rejected");
                None
            }
        })
        .collect()
}
