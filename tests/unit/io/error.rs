//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use photomosaic::{Color, MosaicError};
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = MosaicError::FileSystem {
            path: "/tmp/tiles".into(),
            operation: "read directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(MosaicError::EmptyPalette.source().is_none());
    }

    // Tests region errors describe size, origin and bounds
    // Verified by omitting the bounds from the message
    #[test]
    fn test_invalid_region_message() {
        let error = MosaicError::InvalidRegion {
            origin: Some((3, 4)),
            size: (5, 6),
            channels: 3,
            bounds: Some((7, 8)),
        };

        let message = error.to_string();
        assert!(message.contains("5x6"));
        assert!(message.contains("(3, 4)"));
        assert!(message.contains("7x8"));
    }

    // Tests regions without a known placement print only what is known
    // Verified by printing a default origin for unplaced regions
    #[test]
    fn test_unplaced_region_message() {
        let error = MosaicError::InvalidRegion {
            origin: None,
            size: (2, 2),
            channels: 4,
            bounds: None,
        };

        let message = error.to_string();
        assert!(message.contains("2x2 with 4 channels"));
        assert!(!message.contains(" at "));
        assert!(!message.contains("buffer"));
    }

    // Tests SourceTooSmall reports both dimensions and the tile size
    // Verified by omitting the tile size
    #[test]
    fn test_source_too_small_message() {
        let error = MosaicError::SourceTooSmall {
            width: 10,
            height: 3,
            tile_size: 16,
        };

        let message = error.to_string();
        assert!(message.contains("10x3"));
        assert!(message.contains("16x16"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = photomosaic::io::error::invalid_parameter("tile_size", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("tile_size"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
    }

    // Tests MissingTile names the color
    // Verified by printing the color in debug form
    #[test]
    fn test_missing_tile_message() {
        let error = MosaicError::MissingTile {
            color: Color::new(1, 2, 3),
        };
        assert!(error.to_string().contains("(1, 2, 3)"));
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = MosaicError::ImageExport {
            path: "out/mosaic.png".into(),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("out/mosaic.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests conversions from library errors used by the ? operator
    // Verified by mapping io errors to InvalidParameter
    #[test]
    fn test_from_conversions() {
        let io: MosaicError = std::io::Error::other("boom").into();
        assert!(matches!(io, MosaicError::FileSystem { .. }));

        let decode = MosaicError::from(image::ImageError::IoError(std::io::Error::other("bad")));
        assert!(matches!(decode, MosaicError::ImageDecode { .. }));
    }
}
