use std::collections::BTreeMap;

/// Regular-polygon marker geometry: side count plus a rotation applied at
/// render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerShape {
    pub sides: u32,
    pub rotation_deg: f64,
}

/// Rendering style bound to one genus label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenusStyle {
    /// CSS color name, drawn from the palette.
    pub color: &'static str,
    pub shape: MarkerShape,
}

/// Fixed color/shape lists the assigner cycles through, plus the fallback
/// style for absent or unmapped genera. Lists must be non-empty.
#[derive(Debug, Clone)]
pub struct StylePalette {
    pub colors: &'static [&'static str],
    pub shapes: &'static [MarkerShape],
    pub fallback: GenusStyle,
}

const COLORS: &[&str] = &[
    "red", "blue", "green", "purple", "orange",
    "darkred", "darkblue", "darkgreen", "cadetblue",
    "pink", "black", "gray",
];

const SHAPES: &[MarkerShape] = &[
    MarkerShape { sides: 3, rotation_deg: 0.0 },
    MarkerShape { sides: 4, rotation_deg: 45.0 },
    MarkerShape { sides: 5, rotation_deg: 0.0 },
    MarkerShape { sides: 6, rotation_deg: 0.0 },
    MarkerShape { sides: 8, rotation_deg: 0.0 },
    MarkerShape { sides: 3, rotation_deg: 180.0 },
    MarkerShape { sides: 4, rotation_deg: 0.0 },
];

const FALLBACK: GenusStyle = GenusStyle {
    color: "gray",
    shape: MarkerShape { sides: 4, rotation_deg: 0.0 },
};

impl Default for StylePalette {
    fn default() -> Self {
        Self { colors: COLORS, shapes: SHAPES, fallback: FALLBACK }
    }
}

/// Assign a (color, shape) pair to each distinct genus label.
///
/// Labels are sorted lexicographically so the mapping is stable across runs.
/// The color and shape lists are consumed by two independent cursors, each
/// wrapping around when its list is exhausted.
pub fn assign_styles<I, S>(genera: I, palette: &StylePalette) -> BTreeMap<String, GenusStyle>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    debug_assert!(!palette.colors.is_empty() && !palette.shapes.is_empty());

    let mut labels: Vec<String> = genera.into_iter().map(Into::into).collect();
    labels.sort();
    labels.dedup();

    let mut color_idx = 0;
    let mut shape_idx = 0;
    let mut styles = BTreeMap::new();
    for label in labels {
        styles.insert(label, GenusStyle {
            color: palette.colors[color_idx],
            shape: palette.shapes[shape_idx],
        });
        color_idx = (color_idx + 1) % palette.colors.len();
        shape_idx = (shape_idx + 1) % palette.shapes.len();
    }
    styles
}

/// Look up the style for a genus, falling back to the palette fallback when
/// the label is absent or unmapped.
pub fn resolve_style(
    genus: Option<&str>,
    styles: &BTreeMap<String, GenusStyle>,
    palette: &StylePalette,
) -> GenusStyle {
    genus.and_then(|g| styles.get(g).copied()).unwrap_or(palette.fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_mapping() {
        let palette = StylePalette::default();
        let styles = assign_styles(Vec::<String>::new(), &palette);
        assert!(styles.is_empty());
    }

    #[test]
    fn one_entry_per_distinct_genus() {
        let palette = StylePalette::default();
        let styles = assign_styles(["Quercus", "Acer", "Pinus", "Acer"], &palette);
        assert_eq!(styles.len(), 3);
        for style in styles.values() {
            assert!(palette.colors.contains(&style.color));
            assert!(palette.shapes.contains(&style.shape));
        }
    }

    #[test]
    fn assignment_follows_sorted_order() {
        let palette = StylePalette::default();
        // Input order must not matter; "Acer" sorts first and takes the
        // first color/shape of each list.
        let styles = assign_styles(["Quercus", "Acer"], &palette);
        assert_eq!(styles["Acer"].color, "red");
        assert_eq!(styles["Acer"].shape, MarkerShape { sides: 3, rotation_deg: 0.0 });
        assert_eq!(styles["Quercus"].color, "blue");
        assert_eq!(styles["Quercus"].shape, MarkerShape { sides: 4, rotation_deg: 45.0 });
    }

    #[test]
    fn assignment_is_deterministic() {
        let palette = StylePalette::default();
        let genera = ["Ulmus", "Acer", "Pinus", "Quercus", "Cedrus"];
        let first = assign_styles(genera, &palette);
        let second = assign_styles(genera, &palette);
        assert_eq!(first, second);
    }

    #[test]
    fn color_cursor_wraps_after_twelve() {
        let palette = StylePalette::default();
        // 13 labels that already sort as g00 < g01 < ... < g12.
        let genera: Vec<String> = (0..13).map(|i| format!("g{i:02}")).collect();
        let styles = assign_styles(genera, &palette);
        assert_eq!(styles["g12"].color, styles["g00"].color);
        assert_ne!(styles["g11"].color, styles["g00"].color);
    }

    #[test]
    fn shape_cursor_wraps_independently_of_color() {
        let palette = StylePalette::default();
        let genera: Vec<String> = (0..8).map(|i| format!("g{i:02}")).collect();
        let styles = assign_styles(genera, &palette);
        // Shape list has 7 entries: the 8th genus re-uses the 1st shape
        // while still receiving a fresh color.
        assert_eq!(styles["g07"].shape, styles["g00"].shape);
        assert_ne!(styles["g07"].color, styles["g00"].color);
    }

    #[test]
    fn unmapped_genus_resolves_to_fallback() {
        let palette = StylePalette::default();
        let styles = assign_styles(["Acer"], &palette);
        let style = resolve_style(Some("Sequoia"), &styles, &palette);
        assert_eq!(style.color, "gray");
        assert_eq!(style.shape, MarkerShape { sides: 4, rotation_deg: 0.0 });
        assert_eq!(resolve_style(None, &styles, &palette), palette.fallback);
    }

    #[test]
    fn mapped_genus_resolves_to_its_style() {
        let palette = StylePalette::default();
        let styles = assign_styles(["Acer"], &palette);
        assert_eq!(resolve_style(Some("Acer"), &styles, &palette), styles["Acer"]);
    }
}
