//! Low-level nom parser functions for CSS-like style values.
//!
//! These parsers are strict: they either recognise a value completely or
//! fail. Leniency (dropping what does not parse) is the job of the callers
//! in [`crate::css`].

use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while_m_n, take_while1};
use nom::character::complete::{alpha1, char, digit1, multispace0};
use nom::combinator::{map, map_opt, map_res, opt, recognize, value};
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use quire_types::Color;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// Point size every relative font unit is measured against.
pub const BASE_FONT_SIZE_PT: f64 = 12.0;

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("white", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("red", Color::rgb(0xFF, 0x00, 0x00)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("cyan", Color::rgb(0x00, 0xFF, 0xFF)),
    ("magenta", Color::rgb(0xFF, 0x00, 0xFF)),
    ("gray", Color::gray(0x80)),
    ("grey", Color::gray(0x80)),
    ("darkgray", Color::gray(0xA9)),
    ("darkgrey", Color::gray(0xA9)),
    ("lightgray", Color::gray(0xD3)),
    ("lightgrey", Color::gray(0xD3)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("silver", Color::gray(0xC0)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("lime", Color::rgb(0x00, 0xFF, 0x00)),
    ("aqua", Color::rgb(0x00, 0xFF, 0xFF)),
    ("fuchsia", Color::rgb(0xFF, 0x00, 0xFF)),
    ("orange", Color::rgb(0xFF, 0xA5, 0x00)),
    ("pink", Color::rgb(0xFF, 0xC0, 0xCB)),
    ("brown", Color::rgb(0xA5, 0x2A, 0x2A)),
    ("gold", Color::rgb(0xFF, 0xD7, 0x00)),
    ("violet", Color::rgb(0xEE, 0x82, 0xEE)),
    ("indigo", Color::rgb(0x4B, 0x00, 0x82)),
    ("darkred", Color::rgb(0x8B, 0x00, 0x00)),
    ("darkgreen", Color::rgb(0x00, 0x64, 0x00)),
    ("darkblue", Color::rgb(0x00, 0x00, 0x8B)),
    ("lightblue", Color::rgb(0xAD, 0xD8, 0xE6)),
    ("lightgreen", Color::rgb(0x90, 0xEE, 0x90)),
    ("lightred", Color::rgb(0xFF, 0xB6, 0xC1)),
];

/// Looks up a CSS color keyword, case-insensitively.
pub fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

// --- Helper Parsers ---

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn parse_unsigned(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

fn parse_signed(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

// --- Color Parsers ---

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_primary(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), |s: &str| u8::from_str_radix(s, 16)).parse(input)
}

fn hex_short_primary(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(1, 1, is_hex_digit), |s: &str| {
        u8::from_str_radix(s, 16).map(|v| v * 17)
    })
    .parse(input)
}

fn hex_color(input: &str) -> IResult<&str, Color> {
    preceded(
        char('#'),
        alt((
            map((hex_primary, hex_primary, hex_primary), |(r, g, b)| Color::rgb(r, g, b)),
            map(
                (hex_short_primary, hex_short_primary, hex_short_primary),
                |(r, g, b)| Color::rgb(r, g, b),
            ),
        )),
    )
    .parse(input)
}

/// A channel is rounded first, then range-checked.
fn rgb_channel(input: &str) -> IResult<&str, u8> {
    map_opt(parse_unsigned, |v| {
        let rounded = v.round();
        (rounded <= 255.0).then_some(rounded as u8)
    })
    .parse(input)
}

fn alpha_suffix(input: &str) -> IResult<&str, &str> {
    preceded(char(','), ws(take_while1(|c: char| c.is_ascii_digit() || c == '.'))).parse(input)
}

fn rgb_color(input: &str) -> IResult<&str, Color> {
    let (input, _) = (tag_no_case("rgb"), opt(tag_no_case("a")), multispace0, char('(')).parse(input)?;
    let (input, (r, _, g, _, b)) = (
        ws(rgb_channel),
        char(','),
        ws(rgb_channel),
        char(','),
        ws(rgb_channel),
    )
        .parse(input)?;
    let (input, _) = (opt(alpha_suffix), char(')')).parse(input)?;
    Ok((input, Color::rgb(r, g, b)))
}

fn percentage(input: &str) -> IResult<&str, f64> {
    let (input, v) = ws(parse_signed).parse(input)?;
    let (input, _) = (char('%'), multispace0).parse(input)?;
    Ok((input, v))
}

fn hsl_color(input: &str) -> IResult<&str, Color> {
    let (input, _) = (tag_no_case("hsl"), opt(tag_no_case("a")), multispace0, char('(')).parse(input)?;
    let (input, (h, _, s, _, l)) =
        (ws(parse_signed), char(','), percentage, char(','), percentage).parse(input)?;
    let (input, _) = (opt(alpha_suffix), char(')')).parse(input)?;
    Ok((input, hsl_to_rgb(h, s, l)))
}

/// Hue wraps modulo 360; saturation and lightness clamp to [0, 100].
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::rgb(to_channel(r), to_channel(g), to_channel(b))
}

fn keyword_color(input: &str) -> IResult<&str, Color> {
    map_opt(alpha1, named_color).parse(input)
}

/// Parses any supported CSS color: hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`
/// or a color keyword.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((hex_color, rgb_color, hsl_color, keyword_color)).parse(input)
}

// --- Font Size ---

fn font_size_unit(input: &str) -> IResult<&str, f64> {
    alt((
        value(0.75, tag_no_case("px")),
        value(1.0, tag_no_case("pt")),
        value(BASE_FONT_SIZE_PT, tag_no_case("em")),
        value(BASE_FONT_SIZE_PT / 100.0, char('%')),
    ))
    .parse(input)
}

/// Parses a font size into points. Unitless numbers are points.
pub fn parse_font_size(input: &str) -> IResult<&str, f64> {
    map(pair(parse_signed, opt(font_size_unit)), |(v, unit)| {
        v * unit.unwrap_or(1.0)
    })
    .parse(input)
}

/// Resolves a font size to whole points; non-positive sizes are rejected.
pub fn font_size_pt(input: &str) -> Result<f32, StyleParseError> {
    let points = run_parser(parse_font_size, input)?;
    if points <= 0.0 {
        return Err(StyleParseError::InvalidValue {
            property: "font-size".to_string(),
            value: input.to_string(),
        });
    }
    Ok(points.round() as f32)
}

// --- Declaration Tokenizer ---

/// Splits a `style` attribute into lowercased `(property, value)` pairs.
///
/// Semicolons nested inside parentheses do not end a declaration, so
/// functional values survive intact. Fragments without a property name or
/// a value are skipped.
pub fn declarations(input: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                push_declaration(&input[start..idx], &mut out);
                start = idx + 1;
            }
            _ => {}
        }
    }
    push_declaration(&input[start..], &mut out);
    out
}

fn push_declaration(fragment: &str, out: &mut Vec<(String, String)>) {
    let Some((property, value)) = fragment.split_once(':') else {
        return;
    };
    let property = property.trim().to_lowercase();
    let value = value.trim();
    if !property.is_empty() && !value.is_empty() {
        out.push((property, value.to_string()));
    }
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}
