//! Font faces and the font table indexed by `TextStyle::font_id`.

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// A font face selection: family name plus weight and slant.
///
/// The generic family names `sans-serif`, `serif` and `monospace` map to the
/// backend's generic families; anything else is looked up by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontFace {
    pub family: String,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl FontFace {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn slant(mut self, slant: FontSlant) -> Self {
        self.slant = slant;
        self
    }

    /// Bold sans-serif, the face every text element uses unless configured otherwise.
    pub fn sans_bold() -> Self {
        Self::new("sans-serif").weight(FontWeight::Bold)
    }
}

impl Default for FontFace {
    fn default() -> Self {
        Self::sans_bold()
    }
}

/// Faces addressable by font id. Id 0 is the fallback for unknown ids.
#[derive(Debug, Clone)]
pub struct FontTable {
    faces: Vec<FontFace>,
}

impl Default for FontTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FontTable {
    /// Build a table; an empty list gets the default face.
    pub fn new(mut faces: Vec<FontFace>) -> Self {
        if faces.is_empty() {
            faces.push(FontFace::default());
        }
        Self { faces }
    }

    /// Face for `font_id`, falling back to face 0.
    pub fn face(&self, font_id: u16) -> &FontFace {
        match self.faces.get(font_id as usize) {
            Some(face) => face,
            None => {
                tracing::debug!(font_id, "unknown font id, using face 0");
                &self.faces[0]
            }
        }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
