pub mod font;
pub mod text;
pub mod dimension;
pub mod stylesheet;
pub mod parsers;
pub mod css;
pub mod mapper;

pub use font::{FontStyle, FontWeight};
pub use text::{Alignment, TextDecoration};
pub use dimension::{Margins, PageOrientation, PageSize};
pub use stylesheet::{FillRule, LineRule, NamedStyle, Stylesheet, TableLayout};
pub use parsers::StyleParseError;
pub use css::{ParsedStyles, color_brightness, convert_color, is_valid_color, parse_style_attribute};
pub use mapper::{PdfStyle, extract_style_from_attributes, map_css_style};
pub use quire_types::Color;
