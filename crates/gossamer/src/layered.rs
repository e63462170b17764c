//! Layered regions: the leaf visual primitives inside a frame's draw list.
//!
//! A layered region never receives input and never owns children. Within a
//! frame, layered regions draw in ([`DrawLayer`], sub-layer) order.

use gossamer_render::{Color, FontDesc, TextureHandle};

/// Intra-frame draw layer, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    Background,
    Border,
    Artwork,
    Overlay,
    Highlight,
}

/// Horizontal justification for rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// The visual payload of a layered region.
pub enum LayeredPayload {
    /// A solid color fill, optionally textured.
    Texture {
        /// Backend texture to draw; a plain color fill when absent.
        texture: Option<TextureHandle>,
        /// Fill color, or tint when a texture is present.
        color: Color,
    },
    /// A single line of text.
    Text {
        /// The string to render.
        text: String,
        /// Requested font.
        font: FontDesc,
        /// Text color.
        color: Color,
        /// Horizontal placement within the region's rectangle.
        justify: Justify,
    },
}

/// Layered payload of a region slot.
pub struct LayeredData {
    /// Draw layer within the owning frame.
    pub(crate) layer: DrawLayer,
    /// Ordering within the layer; higher draws later.
    pub(crate) sub_layer: i32,
    pub(crate) payload: LayeredPayload,
}

impl LayeredData {
    pub(crate) fn texture(layer: DrawLayer) -> Self {
        Self {
            layer,
            sub_layer: 0,
            payload: LayeredPayload::Texture {
                texture: None,
                color: Color::WHITE,
            },
        }
    }

    pub(crate) fn text(layer: DrawLayer) -> Self {
        Self {
            layer,
            sub_layer: 0,
            payload: LayeredPayload::Text {
                text: String::new(),
                font: FontDesc::default(),
                color: Color::WHITE,
                justify: Justify::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_order() {
        assert!(DrawLayer::Background < DrawLayer::Border);
        assert!(DrawLayer::Overlay < DrawLayer::Highlight);
    }
}
