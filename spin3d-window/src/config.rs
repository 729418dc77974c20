/// Interactive console prompts for the cube parameters
use spin3d_core::color::COLOR_NAMES;
use spin3d_core::Color;
use std::io::{self, Write};

pub const DEFAULT_SIZE: f32 = 2.0;
pub const DEFAULT_ANGLE: f32 = 1.0;
pub const DEFAULT_SPEED: f32 = 1.0;

/// User-chosen rendering parameters gathered at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeConfig {
    pub color: Color,
    pub size: f32,
    pub angle: f32,
    pub speed: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: DEFAULT_SIZE,
            angle: DEFAULT_ANGLE,
            speed: DEFAULT_SPEED,
        }
    }
}

/// Run the four interactive prompts in order: color, size, angle, speed.
///
/// Every prompt independently falls back to its documented default when the
/// input does not parse; only stdin failures propagate.
pub fn prompt_config() -> io::Result<CubeConfig> {
    println!("Available colors: {}", COLOR_NAMES.join(", "));
    let answer = ask(
        "Enter the color name or custom RGB values (comma-separated, e.g. '1,0,0' for red): ",
    )?;
    let color = resolve_color(&answer);

    let answer = ask("Enter the dimensions of the cube (single value for all sides): ")?;
    let size = resolve_scalar(&answer, DEFAULT_SIZE, "dimensions");

    let answer = ask("Enter the angle at which you want to rotate the cube: ")?;
    let angle = resolve_scalar(&answer, DEFAULT_ANGLE, "angle");

    let answer = ask("Enter the speed of the rotation (higher value for faster rotation): ")?;
    let speed = resolve_scalar(&answer, DEFAULT_SPEED, "speed");

    Ok(CubeConfig {
        color,
        size,
        angle,
        speed,
    })
}

fn ask(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer)
}

/// Color fallback: anything that is not a known name or an in-range RGB
/// triple becomes white.
pub fn resolve_color(input: &str) -> Color {
    match Color::parse(input) {
        Some(color) => color,
        None => {
            println!("Invalid color input. Using default color (white).");
            Color::WHITE
        }
    }
}

/// Numeric fallback: input that does not parse as a float becomes the
/// documented default.
pub fn resolve_scalar(input: &str, default: f32, what: &str) -> f32 {
    match input.trim().parse::<f32>() {
        Ok(value) => value,
        Err(_) => {
            println!("Invalid {} input. Using default ({:.1}).", what, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = CubeConfig::default();
        assert_eq!(config.color, Color::WHITE);
        assert_eq!(config.size, 2.0);
        assert_eq!(config.angle, 1.0);
        assert_eq!(config.speed, 1.0);
    }

    #[test]
    fn numeric_input_parses_with_whitespace() {
        assert_eq!(resolve_scalar(" 4.5 \n", DEFAULT_SIZE, "dimensions"), 4.5);
        assert_eq!(resolve_scalar("-1", DEFAULT_SPEED, "speed"), -1.0);
    }

    #[test]
    fn non_numeric_input_falls_back_to_the_default() {
        assert_eq!(resolve_scalar("abc", DEFAULT_SIZE, "dimensions"), 2.0);
        assert_eq!(resolve_scalar("", DEFAULT_ANGLE, "angle"), 1.0);
        assert_eq!(resolve_scalar("fast", DEFAULT_SPEED, "speed"), 1.0);
    }

    #[test]
    fn named_color_resolves() {
        assert_eq!(resolve_color("red"), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn bad_color_falls_back_to_white() {
        assert_eq!(resolve_color("2,0,0"), Color::WHITE);
        assert_eq!(resolve_color("chartreuse"), Color::WHITE);
    }
}
