use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::ImageError;

/// Preview shown until an image is selected.
pub const PLACEHOLDER_IMAGE: &str = "/imagePlaceHolder.svg";

/// Mime types offered by the image picker.
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Png,
    Jpeg,
}

impl ImageType {
    /// Map a picker mime type, `image/jpg` being an alias of `image/jpeg`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if !ACCEPTED_IMAGE_TYPES.contains(&mime.as_str()) {
            return None;
        }
        Some(if mime == "image/png" {
            ImageType::Png
        } else {
            ImageType::Jpeg
        })
    }

    /// Content type recorded on upload.
    pub fn mime(&self) -> &'static str {
        match self {
            ImageType::Png => "image/png",
            ImageType::Jpeg => "image/jpeg",
        }
    }
}

/// An image picked for upload, kept verbatim as the upload payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    file_name: String,
    image_type: ImageType,
    bytes: Vec<u8>,
}

impl ImageFile {
    /// Accept a picked file.
    ///
    /// The declared mime type wins; when it is absent or generic the type is
    /// guessed from the file name.
    pub fn new(
        file_name: impl Into<String>,
        declared_mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let file_name = file_name.into();

        let declared = declared_mime
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != "application/octet-stream");

        let image_type = match declared {
            Some(mime) => ImageType::from_mime(mime)
                .ok_or_else(|| ImageError::UnsupportedType(mime.to_string()))?,
            None => {
                let guessed = mime_guess::from_path(&file_name).first_raw();
                guessed
                    .and_then(ImageType::from_mime)
                    .ok_or_else(|| {
                        ImageError::UnsupportedType(guessed.unwrap_or("unknown").to_string())
                    })?
            }
        };

        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        Ok(Self {
            file_name,
            image_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn content_type(&self) -> &'static str {
        self.image_type.mime()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:` URL for rendering a live preview.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// What the clickable image area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder,
    DataUrl(String),
}

impl Preview {
    pub fn src(&self) -> &str {
        match self {
            Preview::Placeholder => PLACEHOLDER_IMAGE,
            Preview::DataUrl(url) => url,
        }
    }
}
