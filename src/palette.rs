/// Categorical color assignment for stratigraphic-unit labels.
///
/// Labels are assigned palette slots in first-seen order, once per
/// rendering pass. Lookup is O(1). Past the palette size the slots
/// wrap around, which trades distinctness for totality.
use std::collections::HashMap;

/// Fully opaque 4-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS `rgba(...)` string with alpha normalized to [0, 1].
    pub fn css(&self) -> String {
        format!(
            "rgba({},{},{},{:.2})",
            self.r,
            self.g,
            self.b,
            f64::from(self.a) / 255.0
        )
    }
}

/// The tab20 colormap, the conventional 20-slot categorical palette.
pub const PALETTE: [Rgba; 20] = [
    Rgba::opaque(0x1f, 0x77, 0xb4),
    Rgba::opaque(0xae, 0xc7, 0xe8),
    Rgba::opaque(0xff, 0x7f, 0x0e),
    Rgba::opaque(0xff, 0xbb, 0x78),
    Rgba::opaque(0x2c, 0xa0, 0x2c),
    Rgba::opaque(0x98, 0xdf, 0x8a),
    Rgba::opaque(0xd6, 0x27, 0x28),
    Rgba::opaque(0xff, 0x98, 0x96),
    Rgba::opaque(0x94, 0x67, 0xbd),
    Rgba::opaque(0xc5, 0xb0, 0xd5),
    Rgba::opaque(0x8c, 0x56, 0x4b),
    Rgba::opaque(0xc4, 0x9c, 0x94),
    Rgba::opaque(0xe3, 0x77, 0xc2),
    Rgba::opaque(0xf7, 0xb6, 0xd2),
    Rgba::opaque(0x7f, 0x7f, 0x7f),
    Rgba::opaque(0xc7, 0xc7, 0xc7),
    Rgba::opaque(0xbc, 0xbd, 0x22),
    Rgba::opaque(0xdb, 0xdb, 0x8d),
    Rgba::opaque(0x17, 0xbe, 0xcf),
    Rgba::opaque(0x9e, 0xda, 0xe5),
];

/// Neutral grey for segments whose label was not in the pass that
/// built the map.
pub const UNMAPPED: Rgba = Rgba::opaque(0xad, 0xb5, 0xbd);

/// Label → color mapping for one rendering pass.
pub struct ColorMap {
    index: HashMap<String, usize>,
    labels: Vec<String>,
}

impl ColorMap {
    /// Build the mapping from labels in first-seen order. Duplicates
    /// keep their first slot.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for label in labels {
            if !index.contains_key(label) {
                index.insert(label.to_string(), order.len());
                order.push(label.to_string());
            }
        }
        Self {
            index,
            labels: order,
        }
    }

    pub fn color_of(&self, label: &str) -> Option<Rgba> {
        self.index.get(label).map(|&i| PALETTE[i % PALETTE.len()])
    }

    /// Distinct labels in first-seen order, for legend construction.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_keep_first_seen_order() {
        let map = ColorMap::from_labels(["Shale", "Sand", "Shale", "Coal"]);
        assert_eq!(map.labels(), &["Shale", "Sand", "Coal"]);
    }

    #[test]
    fn distinct_labels_get_distinct_colors_within_palette() {
        let labels: Vec<String> = (0..20).map(|i| format!("unit-{i}")).collect();
        let map = ColorMap::from_labels(labels.iter().map(String::as_str));
        for a in 0..labels.len() {
            for b in (a + 1)..labels.len() {
                assert_ne!(
                    map.color_of(&labels[a]),
                    map.color_of(&labels[b]),
                    "{} and {} collided",
                    labels[a],
                    labels[b]
                );
            }
        }
    }

    #[test]
    fn lookup_is_deterministic() {
        let map = ColorMap::from_labels(["Sand", "Shale"]);
        assert_eq!(map.color_of("Sand"), map.color_of("Sand"));
        assert_eq!(map.color_of("Sand"), Some(PALETTE[0]));
        assert_eq!(map.color_of("Shale"), Some(PALETTE[1]));
    }

    #[test]
    fn wraps_past_palette_size_in_first_seen_order() {
        let labels: Vec<String> = (0..25).map(|i| format!("unit-{i}")).collect();
        let map = ColorMap::from_labels(labels.iter().map(String::as_str));
        for i in 20..25 {
            assert_eq!(map.color_of(&labels[i]), Some(PALETTE[i - 20]));
        }
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let map = ColorMap::from_labels(std::iter::empty::<&str>());
        assert!(map.is_empty());
        assert_eq!(map.color_of("Sand"), None);
    }

    #[test]
    fn unknown_label_has_no_color() {
        let map = ColorMap::from_labels(["Sand"]);
        assert_eq!(map.color_of("Granite"), None);
    }

    #[test]
    fn css_string_is_fully_opaque() {
        assert_eq!(PALETTE[0].css(), "rgba(31,119,180,1.00)");
    }
}
