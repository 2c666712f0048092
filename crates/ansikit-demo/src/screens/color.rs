#![forbid(unsafe_code)]

//! Color screens: the sixteen named colors, the 256-color palette and
//! true-color ramps.

use std::io::Write;

use ansikit::codes::color::{
    Ansi16, CUBE_START, Color, GRAYSCALE_START, ansi256_to_rgb, rgb_to_256,
};
use ansikit::style::{TextStyle, colorize, wrap};
use ansikit::{ByteSource, RawModeControl, Result, Terminal};

use crate::menu::pad_right;

const GRADIENT_STEPS: u16 = 64;

fn swatch(index: u8) -> Result<String> {
    wrap(TextStyle::Background(Color::Indexed(index)), "  ")
}

pub fn ansi16<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    for pair in Ansi16::ALL.chunks(2) {
        let mut line = String::new();
        for &color in pair {
            let name = pad_right(color.name(), 16);
            line.push_str(&colorize(&name, Color::Ansi16(color)));
            line.push_str(&wrap(TextStyle::Background(Color::Ansi16(color)), "    ")?);
            line.push_str("    ");
        }
        term.println(&format!("  {line}"))?;
    }
    term.println("")?;
    term.println("Foreground 30-37 and 90-97, background 40-47 and 100-107.")
}

pub fn palette256<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.println("System colors 0-15:")?;
    let mut line = String::from("  ");
    for index in 0..CUBE_START {
        line.push_str(&swatch(index)?);
    }
    term.println(&line)?;

    term.println("Color cube 16-231:")?;
    for green in 0..6u8 {
        let mut line = String::from("  ");
        for red in 0..6u8 {
            for blue in 0..6u8 {
                line.push_str(&swatch(CUBE_START + 36 * red + 6 * green + blue)?);
            }
            line.push(' ');
        }
        term.println(&line)?;
    }

    term.println("Grayscale 232-255:")?;
    let mut line = String::from("  ");
    for index in GRAYSCALE_START..=u8::MAX {
        line.push_str(&swatch(index)?);
    }
    term.println(&line)?;

    let sample = ansi256_to_rgb(208);
    term.println(&format!(
        "Index 208 is #{:02x}{:02x}{:02x}; #ff8000 maps back to index {}.",
        sample.r,
        sample.g,
        sample.b,
        rgb_to_256(0xff, 0x80, 0x00)
    ))
}

fn ramp(steps: u16, paint: impl Fn(u8) -> Color) -> Result<String> {
    let mut line = String::from("  ");
    for step in 0..steps {
        let level = u8::try_from(step * 255 / (steps - 1)).unwrap_or(u8::MAX);
        line.push_str(&wrap(TextStyle::Background(paint(level)), " ")?);
    }
    Ok(line)
}

pub fn true_color<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    let ramps: [(&str, fn(u8) -> Color); 4] = [
        ("red", |v| Color::rgb(v, 0, 0)),
        ("green", |v| Color::rgb(0, v, 0)),
        ("blue", |v| Color::rgb(0, 0, v)),
        ("gray", |v| Color::rgb(v, v, v)),
    ];
    for (name, paint) in ramps {
        term.println(name)?;
        term.println(&ramp(GRADIENT_STEPS, paint)?)?;
    }
    term.println("rainbow")?;
    term.println(&ramp(GRADIENT_STEPS, |v| {
        Color::rgb(v, 255 - v.abs_diff(128).saturating_mul(2), 255 - v)
    })?)?;
    term.println("")?;
    term.println("Banding means the terminal is rounding 24-bit colors down.")
}
