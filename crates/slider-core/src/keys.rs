use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Keys the slider reacts to. Anything else is carried as its raw key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Space bar.
    Space,
    /// Any other key, by code.
    Other(u16),
}

// Variant, DOM key code, canonical spec name.
macro_rules! key_table {
    ($m:ident, $arg:tt) => {
        $m! { $arg,
            Up => 38, "up",
            Down => 40, "down",
            Left => 37, "left",
            Right => 39, "right",
            PageUp => 33, "pageup",
            PageDown => 34, "pagedown",
            Home => 36, "home",
            End => 35, "end",
            Space => 32, "space",
        }
    };
}

macro_rules! from_code_match {
    ( $code:expr, $( $k:ident => $c:expr, $s:expr, )* ) => {
        match $code {
            $( $c => Key::$k, )*
            other => Key::Other(other),
        }
    };
}

macro_rules! to_code_match {
    ( $key:expr, $( $k:ident => $c:expr, $s:expr, )* ) => {
        match $key {
            $( Key::$k => $c, )*
            Key::Other(code) => code,
        }
    };
}

macro_rules! from_spec_match {
    ( $s:expr, $( $k:ident => $c:expr, $name:expr, )* ) => {
        match $s {
            $( $name => Some(Key::$k), )*
            _ => None,
        }
    };
}

// Parse-only aliases.
macro_rules! key_aliases {
    ($m:ident, $arg:tt) => {
        $m! { $arg,
            Up => 0, "arrowup",
            Down => 0, "arrowdown",
            Left => 0, "arrowleft",
            Right => 0, "arrowright",
            PageUp => 0, "pgup",
            PageDown => 0, "pgdn",
            Space => 0, " ",
        }
    };
}

impl Key {
    /// Map a DOM key code to a key.
    pub fn from_code(code: u16) -> Self {
        key_table!(from_code_match, code)
    }

    /// DOM key code for this key.
    pub fn code(self) -> u16 {
        let key = self;
        key_table!(to_code_match, key)
    }

    /// Parse a key name, case-insensitively.
    ///
    /// Accepts the canonical names (`up`, `pageup`, `home`, ...), the aliases
    /// `arrowup`/`arrowdown`/`arrowleft`/`arrowright`, `pgup`, `pgdn`, `" "`, and a
    /// bare numeric key code.
    pub fn from_spec(s: &str) -> Option<Self> {
        let lowered = s.to_ascii_lowercase();
        let name = lowered.as_str();
        if let some @ Some(_) = key_table!(from_spec_match, name) {
            return some;
        }
        if let some @ Some(_) = key_aliases!(from_spec_match, name) {
            return some;
        }
        name.trim().parse::<u16>().ok().map(Self::from_code)
    }

    /// Canonical name. Unknown keys render as their numeric code.
    pub fn to_spec(self) -> String {
        match self {
            Self::Other(code) => code.to_string(),
            Self::Up => "up".into(),
            Self::Down => "down".into(),
            Self::Left => "left".into(),
            Self::Right => "right".into(),
            Self::PageUp => "pageup".into(),
            Self::PageDown => "pagedown".into(),
            Self::Home => "home".into(),
            Self::End => "end".into(),
            Self::Space => "space".into(),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_spec())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_spec(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown key: {s}")))
    }
}
