/// Image container formats recognized by their leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
    Png,
    Jpeg,
    Bmp,
    WebP,
    Tiff,
    Gd2,
}

impl ImageFormat {
    /// Number of leading bytes needed to tell every format apart.
    pub const SNIFF_LEN: usize = 12;

    pub fn from_magic(head: &[u8]) -> Option<Self> {
        match head {
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(ImageFormat::Gif),
            [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n', ..] => Some(ImageFormat::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [b'B', b'M', ..] => Some(ImageFormat::Bmp),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
                Some(ImageFormat::WebP)
            }
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(ImageFormat::Tiff),
            [b'g', b'd', b'2', 0x00, ..] => Some(ImageFormat::Gd2),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Gif => "GIF",
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Bmp => "BMP",
            ImageFormat::WebP => "WebP",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Gd2 => "GD2",
        }
    }
}

/// Result of probing a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub format: ImageFormat,
    /// `(width, height)` when the format's header carries it up front
    pub dimensions: Option<(u32, u32)>,
}
