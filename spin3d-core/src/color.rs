/// Face color type and user input parsing
use nom::{
    character::complete::{char, multispace0},
    number::complete::float,
    sequence::preceded,
    IResult,
};

/// The color names accepted by [`Color::parse`], in the order they are
/// advertised to the user.
pub const COLOR_NAMES: [&str; 8] = [
    "red", "green", "blue", "yellow", "cyan", "magenta", "white", "black",
];

/// An RGB color with each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Look up one of the predefined color names.
    pub fn from_name(name: &str) -> Option<Color> {
        let color = match name {
            "red" => Color::new(1.0, 0.0, 0.0),
            "green" => Color::new(0.0, 1.0, 0.0),
            "blue" => Color::new(0.0, 0.0, 1.0),
            "yellow" => Color::new(1.0, 1.0, 0.0),
            "cyan" => Color::new(0.0, 1.0, 1.0),
            "magenta" => Color::new(1.0, 0.0, 1.0),
            "white" => Color::WHITE,
            "black" => Color::BLACK,
            _ => return None,
        };
        Some(color)
    }

    /// Parse a color name or a comma-separated RGB triple.
    ///
    /// Input is trimmed and lowercased first. A triple is only accepted when
    /// every channel lies in [0, 1]; anything else yields `None` and the
    /// caller substitutes its default.
    pub fn parse(input: &str) -> Option<Color> {
        let input = input.trim().to_lowercase();
        if let Some(color) = Color::from_name(&input) {
            return Some(color);
        }

        match parse_triple(&input) {
            Ok((rest, color)) if rest.trim().is_empty() && color.in_range() => Some(color),
            _ => None,
        }
    }

    fn in_range(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn parse_triple(input: &str) -> IResult<&str, Color> {
    let (input, r) = preceded(multispace0, float)(input)?;
    let (input, _) = preceded(multispace0, char(','))(input)?;
    let (input, g) = preceded(multispace0, float)(input)?;
    let (input, _) = preceded(multispace0, char(','))(input)?;
    let (input, b) = preceded(multispace0, float)(input)?;
    Ok((input, Color::new(r, g, b)))
}

/// Build the per-face color list: one entry per cube face.
///
/// The draw path looks colors up by index modulo the list length, so callers
/// may substitute a shorter or non-uniform palette without touching the
/// renderer.
pub fn face_colors(color: Color) -> Vec<Color> {
    vec![color; 6]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_resolve() {
        assert_eq!(Color::parse("red"), Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(Color::parse("black"), Some(Color::BLACK));
        for name in COLOR_NAMES {
            assert!(Color::parse(name).is_some(), "missing color {}", name);
        }
    }

    #[test]
    fn names_are_trimmed_and_case_insensitive() {
        assert_eq!(Color::parse("  RED "), Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(Color::parse("Cyan"), Some(Color::new(0.0, 1.0, 1.0)));
    }

    #[test]
    fn triples_parse_with_optional_spaces() {
        assert_eq!(Color::parse("1,0,0"), Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(
            Color::parse("0.2, 0.4, 0.9"),
            Some(Color::new(0.2, 0.4, 0.9))
        );
    }

    #[test]
    fn out_of_range_triple_is_rejected() {
        assert_eq!(Color::parse("2,0,0"), None);
        assert_eq!(Color::parse("0.5,-0.1,0.5"), None);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(Color::parse("no-such-color"), None);
        assert_eq!(Color::parse("1,0"), None);
        assert_eq!(Color::parse("1,0,0,0"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn face_color_list_has_one_entry_per_face() {
        let colors = face_colors(Color::new(0.0, 1.0, 0.0));
        assert_eq!(colors.len(), 6);
        assert!(colors.iter().all(|c| *c == Color::new(0.0, 1.0, 0.0)));
    }
}
