//! Upload options and transformation pipeline types.

/// A single named server-side image operation.
///
/// Transformations are applied by the remote store at upload time, never
/// locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    /// Crop to an exact size, keeping the region selected by `gravity`.
    Fill {
        /// Target width in pixels.
        width: u32,
        /// Target height in pixels.
        height: u32,
        /// Region selection hint (e.g. `face`).
        gravity: String,
    },
    /// Let the store pick optimal quality and delivery format.
    AutoQualityFormat,
}

impl Transformation {
    /// Render this operation as a URL/API parameter component.
    #[must_use]
    pub fn to_param(&self) -> String {
        match self {
            Self::Fill {
                width,
                height,
                gravity,
            } => format!("w_{width},h_{height},c_fill,g_{gravity}"),
            Self::AutoQualityFormat => "q_auto,f_auto".to_string(),
        }
    }
}

/// Options for a single upload request.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Public name the asset is stored under. The store derives the fully
    /// qualified identifier from `folder` + `public_id`.
    pub public_id: String,
    /// Folder the asset is placed in.
    pub folder: String,
    /// Store resource type. Always `image` for avatar uploads.
    pub resource_type: String,
    /// Ordered transformation pipeline applied by the store.
    pub transformations: Vec<Transformation>,
}

impl UploadOptions {
    /// Avatar upload options: square crop with face-aware gravity at
    /// 400x400, then automatic quality/format selection.
    #[must_use]
    pub fn avatar(public_id: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            folder: folder.into(),
            resource_type: "image".to_string(),
            transformations: vec![
                Transformation::Fill {
                    width: 400,
                    height: 400,
                    gravity: "face".to_string(),
                },
                Transformation::AutoQualityFormat,
            ],
        }
    }

    /// Render the transformation pipeline as a single API parameter, one
    /// component per operation, in order.
    #[must_use]
    pub fn transformation_param(&self) -> String {
        self.transformations
            .iter()
            .map(Transformation::to_param)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Successful upload response from the remote store.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Fully qualified public identifier the store assigned.
    pub public_id: String,
    /// Canonical HTTPS delivery URL, when the store reported one.
    pub secure_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_param() {
        let t = Transformation::Fill {
            width: 400,
            height: 400,
            gravity: "face".to_string(),
        };
        assert_eq!(t.to_param(), "w_400,h_400,c_fill,g_face");
    }

    #[test]
    fn test_auto_quality_format_param() {
        assert_eq!(Transformation::AutoQualityFormat.to_param(), "q_auto,f_auto");
    }

    #[test]
    fn test_avatar_pipeline() {
        let options = UploadOptions::avatar("abc123", "profiles");
        assert_eq!(options.resource_type, "image");
        assert_eq!(
            options.transformation_param(),
            "w_400,h_400,c_fill,g_face/q_auto,f_auto"
        );
    }

    #[test]
    fn test_transformation_order_preserved() {
        let options = UploadOptions {
            public_id: "x".to_string(),
            folder: "profiles".to_string(),
            resource_type: "image".to_string(),
            transformations: vec![
                Transformation::AutoQualityFormat,
                Transformation::Fill {
                    width: 100,
                    height: 50,
                    gravity: "auto".to_string(),
                },
            ],
        };
        assert_eq!(
            options.transformation_param(),
            "q_auto,f_auto/w_100,h_50,c_fill,g_auto"
        );
    }
}
