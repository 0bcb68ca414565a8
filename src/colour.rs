/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

/// What a piece of ink is _for_. The layout engine only ever talks in roles;
/// a [Palette] turns them into concrete colours at the drawing surface.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    /// Level 1 heading text
    Title,
    /// Level 2 heading text
    Subtitle,
    /// Level 3 heading text
    Heading,
    /// Regular running text and bullets
    Body,
    /// Bold inline runs, list numbers and standalone bold lines
    Strong,
    /// Rule under level 1 headings
    RuleHeavy,
    /// Rule under level 2 headings
    RuleLight,
    /// Background of a table's header row
    TableFill,
    /// Cell borders
    TableBorder,
    /// Text inside table cells
    TableText,
}

/// Maps each [Role] to a colour
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Palette {
    pub title: Colour,
    pub subtitle: Colour,
    pub heading: Colour,
    pub body: Colour,
    pub strong: Colour,
    pub rule_heavy: Colour,
    pub rule_light: Colour,
    pub table_fill: Colour,
    pub table_border: Colour,
    pub table_text: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            title: Colour::new_rgb_bytes(26, 26, 26),
            subtitle: Colour::new_rgb_bytes(37, 99, 235),
            heading: Colour::new_rgb_bytes(55, 65, 81),
            body: Colour::new_rgb_bytes(51, 51, 51),
            strong: Colour::new_rgb_bytes(26, 26, 26),
            rule_heavy: Colour::new_rgb_bytes(59, 130, 246),
            rule_light: Colour::new_rgb_bytes(229, 231, 235),
            table_fill: Colour::new_rgb_bytes(243, 244, 246),
            table_border: Colour::new_rgb_bytes(209, 213, 219),
            table_text: Colour::new_rgb_bytes(51, 51, 51),
        }
    }
}

impl Palette {
    /// A palette that renders everything in black on white, for printing on
    /// monochrome devices
    pub fn monochrome() -> Palette {
        let black = Colour::new_grey(0.0);
        Palette {
            title: black,
            subtitle: black,
            heading: black,
            body: black,
            strong: black,
            rule_heavy: black,
            rule_light: Colour::new_grey(0.6),
            table_fill: Colour::new_grey(0.9),
            table_border: Colour::new_grey(0.4),
            table_text: black,
        }
    }

    pub fn colour(&self, role: Role) -> Colour {
        match role {
            Role::Title => self.title,
            Role::Subtitle => self.subtitle,
            Role::Heading => self.heading,
            Role::Body => self.body,
            Role::Strong => self.strong,
            Role::RuleHeavy => self.rule_heavy,
            Role::RuleLight => self.rule_light,
            Role::TableFill => self.table_fill,
            Role::TableBorder => self.table_border,
            Role::TableText => self.table_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_maps_roles() {
        let palette = Palette::default();
        assert_eq!(palette.colour(Role::RuleHeavy), Colour::new_rgb_bytes(59, 130, 246));
        assert_eq!(palette.colour(Role::TableFill), Colour::new_rgb_bytes(243, 244, 246));
    }

    #[test]
    fn monochrome_palette_is_all_grey() {
        let palette = Palette::monochrome();
        assert_eq!(palette.colour(Role::Subtitle), Colour::new_grey(0.0));
        assert_eq!(palette.colour(Role::TableFill), Colour::new_grey(0.9));
    }
}
