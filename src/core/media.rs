/// Shown in place of an image that failed to load.
pub const IMAGE_FALLBACK_TEXT: &str = "Failed to load image";

/// Load state of one image. `Loaded` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageLoad {
    #[default]
    Loading,
    Loaded,
    Failed,
}

impl ImageLoad {
    /// Returns true if the state changed.
    pub fn on_load(&mut self) -> bool {
        self.settle(ImageLoad::Loaded)
    }

    /// Returns true if the state changed.
    pub fn on_error(&mut self) -> bool {
        self.settle(ImageLoad::Failed)
    }

    fn settle(&mut self, next: ImageLoad) -> bool {
        if *self != ImageLoad::Loading {
            return false;
        }
        *self = next;
        true
    }

    /// Shimmer placeholder stays up until the image settles.
    pub fn placeholder_visible(self) -> bool {
        self == ImageLoad::Loading
    }

    pub fn fallback_text(self) -> Option<&'static str> {
        (self == ImageLoad::Failed).then_some(IMAGE_FALLBACK_TEXT)
    }
}

/// Outcome of an image that finished before anyone listened, judged from its
/// intrinsic size. `None` when the size cannot tell: a broken image and an
/// SVG without intrinsic dimensions both report 0x0.
pub fn settled_by_size(natural_width: u32, natural_height: u32) -> Option<bool> {
    (natural_width > 0 || natural_height > 0).then_some(true)
}
