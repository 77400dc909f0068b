//! Keyword-valued properties.

/// Declare a keyword enum with its accepted spellings. The first spelling of
/// each variant is the canonical one returned by `keyword()`.
macro_rules! keyword_enum {
    (@first $first:literal $(| $rest:literal)*) => {
        $first
    };
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $($keyword:literal)|+),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Parse a keyword, ASCII case-insensitively.
            pub fn parse(text: &str) -> Option<Self> {
                let lower = text.trim().to_ascii_lowercase();
                match lower.as_str() {
                    $($($keyword)|+ => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Canonical spelling.
            pub const fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => keyword_enum!(@first $($keyword)|+),)+
                }
            }
        }
    };
}

keyword_enum!(
    /// `display`.
    Display {
        Flex = "flex" | "block" | "inline" | "inline-flex",
        None = "none",
    }
);

keyword_enum!(
    /// `position`; `static` is read as `relative`.
    PositionMode {
        Relative = "relative" | "static",
        Absolute = "absolute",
    }
);

keyword_enum!(FlexDirection {
    Row = "row",
    RowReverse = "row-reverse",
    Column = "column",
    ColumnReverse = "column-reverse",
});

keyword_enum!(FlexWrap {
    NoWrap = "nowrap",
    Wrap = "wrap",
    WrapReverse = "wrap-reverse",
});

keyword_enum!(
    /// `justify-content`.
    Justify {
        FlexStart = "flex-start" | "start" | "left",
        FlexEnd = "flex-end" | "end" | "right",
        Center = "center",
        SpaceBetween = "space-between",
        SpaceAround = "space-around",
        SpaceEvenly = "space-evenly",
    }
);

keyword_enum!(
    /// `align-items`, `align-self` and `align-content`.
    Align {
        Auto = "auto",
        FlexStart = "flex-start" | "start",
        FlexEnd = "flex-end" | "end",
        Center = "center",
        Stretch = "stretch",
        Baseline = "baseline",
        SpaceBetween = "space-between",
        SpaceAround = "space-around",
        SpaceEvenly = "space-evenly",
    }
);

keyword_enum!(
    /// `overflow-x`/`overflow-y`; `auto` scrolls.
    OverflowMode {
        Visible = "visible",
        Hidden = "hidden" | "clip",
        Scroll = "scroll" | "auto",
    }
);

keyword_enum!(TextAlign {
    Left = "left" | "start",
    Center = "center",
    Right = "right" | "end",
});

keyword_enum!(WhiteSpace {
    Normal = "normal",
    NoWrap = "nowrap",
    Pre = "pre",
    PreLine = "pre-line",
    PreWrap = "pre-wrap",
});

keyword_enum!(PointerEvents {
    Auto = "auto",
    None = "none",
    All = "all",
});

keyword_enum!(FontStyle {
    Normal = "normal",
    Italic = "italic",
    Oblique = "oblique",
});

keyword_enum!(TextTransform {
    None = "none",
    Uppercase = "uppercase",
    Lowercase = "lowercase",
    Capitalize = "capitalize",
});

keyword_enum!(TextOverflow {
    Clip = "clip",
    Ellipsis = "ellipsis",
});

keyword_enum!(WordBreak {
    Normal = "normal",
    BreakAll = "break-all",
});

keyword_enum!(BackgroundRepeat {
    Repeat = "repeat",
    RepeatX = "repeat-x",
    RepeatY = "repeat-y",
    NoRepeat = "no-repeat",
    Clamp = "clamp",
});

keyword_enum!(ImageRendering {
    Auto = "auto",
    Anisotropic = "anisotropic",
    Bilinear = "bilinear",
    Trilinear = "trilinear",
    Point = "point" | "pixelated",
});

keyword_enum!(BorderImageRepeat {
    Stretch = "stretch",
    Repeat = "repeat",
    Round = "round",
});

keyword_enum!(
    /// Line styles accepted by the `border` shorthands; panels draw every
    /// style as solid except `none`/`hidden`.
    BorderStyle {
        Solid = "solid",
        Dashed = "dashed",
        Dotted = "dotted",
        Double = "double",
        None = "none" | "hidden",
    }
);

keyword_enum!(AnimationDirection {
    Normal = "normal",
    Reverse = "reverse",
    Alternate = "alternate",
    AlternateReverse = "alternate-reverse",
});

keyword_enum!(AnimationFillMode {
    None = "none",
    Forwards = "forwards",
    Backwards = "backwards",
    Both = "both",
});

keyword_enum!(AnimationPlayState {
    Running = "running",
    Paused = "paused",
});
