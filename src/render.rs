//! Render orchestration: from input token to finished raster.
//!
//! Two strategies implement the same [`AvatarRenderer`] contract and are
//! picked at the call site:
//!
//! - [`Avatar`]: one robot. digest → indices → selection → layers →
//!   composite → post-process.
//! - [`Armada`]: three robots in one scene, each seeded by a link of a
//!   digest chain, over a background chosen by a fourth, XOR-folded seed.
//!
//! Capabilities ([`DigestGenerator`], [`AssetCatalog`]) are passed in
//! explicitly: construction takes the digest generator, rendering takes
//! the catalog. There are no process-wide singletons to swap out; a test
//! hands in a stub catalog the same way production hands in the real one.
//!
//! The pipeline is pure and synchronous. Each render owns its intermediate
//! buffers exclusively, so any number of renders may run concurrently
//! against one shared catalog without locking.

use crate::catalog::{AssetCatalog, CatalogError};
use crate::compose::{self, Backdrop, ComposeError};
use crate::digest::DigestGenerator;
use crate::indices::{Identity, IdentityError};
use crate::layers;
use crate::postprocess::{self, RenderOptions};
use crate::selection::{self, Background, SelectionError};
use image::RgbaImage;
use thiserror::Error;

/// Output edge used when the caller doesn't ask for specific dimensions.
pub const DEFAULT_SIZE: u32 = 400;

/// Scale of the secondary avatar drawn at the scene's bottom-left.
const PORT_SCALE: f64 = 0.85;
/// Scale of the secondary avatar drawn at the scene's bottom-right.
const STARBOARD_SCALE: f64 = 0.90;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("empty input")]
    EmptyInput,
    #[error("digest error: {0}")]
    Identity(#[from] IdentityError),
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
}

/// Everything a caller can ask of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Part set name, `"any"`, or `None` for the canonical set.
    pub part_set: Option<String>,
    /// Background set name, `"any"`, a `#RRGGBB`/`#AARRGGBB` literal, or
    /// `None` for no background.
    pub background: Option<String>,
    /// Color variant of the canonical set; ignored for other sets.
    pub color: Option<String>,
    pub width: u32,
    pub height: u32,
    pub options: RenderOptions,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            part_set: None,
            background: None,
            color: None,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            options: RenderOptions::none(),
        }
    }
}

impl RenderRequest {
    /// A default request at the given output size.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

/// Produces an image for a render request. Implemented by the two variant
/// strategies, [`Avatar`] and [`Armada`].
pub trait AvatarRenderer: Sync {
    fn render(
        &self,
        catalog: &dyn AssetCatalog,
        request: &RenderRequest,
    ) -> Result<RgbaImage, RenderError>;
}

/// A single robot avatar, seeded by one digest.
#[derive(Debug, Clone)]
pub struct Avatar {
    identity: Identity,
}

impl Avatar {
    /// Seed an avatar from a text token.
    pub fn from_text(text: &str, digests: &dyn DigestGenerator) -> Result<Self, RenderError> {
        Self::from_bytes(text.as_bytes(), digests)
    }

    /// Seed an avatar from raw bytes. Empty input is rejected before any
    /// digest is computed.
    pub fn from_bytes(bytes: &[u8], digests: &dyn DigestGenerator) -> Result<Self, RenderError> {
        if bytes.is_empty() {
            return Err(RenderError::EmptyInput);
        }
        Ok(Self::from_digest(digests.hex_digest(bytes))?)
    }

    /// Seed an avatar from an already-computed hex digest.
    pub fn from_digest(digest: impl Into<String>) -> Result<Self, IdentityError> {
        Ok(Self {
            identity: Identity::from_digest(digest)?,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl AvatarRenderer for Avatar {
    fn render(
        &self,
        catalog: &dyn AssetCatalog,
        request: &RenderRequest,
    ) -> Result<RgbaImage, RenderError> {
        let selection = selection::resolve(
            &self.identity,
            catalog,
            request.part_set.as_deref(),
            request.color.as_deref(),
            request.background.as_deref(),
        )?;
        let stack = layers::select_layers(&self.identity, catalog, &selection.set_path)?;

        let background_file;
        let backdrop = match &selection.background {
            Background::None => Backdrop::None,
            Background::Color(color) => Backdrop::Fill(*color),
            Background::Set(set) => {
                background_file = layers::select_background_file(&self.identity, catalog, set)?;
                Backdrop::Image(&background_file)
            }
        };

        let mut image = compose::compose(backdrop, &stack, request.width, request.height)?;
        postprocess::apply(&mut image, request.options);
        Ok(image)
    }
}

/// Three digest-chained robots composed into one scene.
///
/// The chain re-hashes hex: digest₂ = digest(utf8(digest₁)), digest₃ =
/// digest(utf8(digest₂)). The scene's background is owned by none of the
/// three: a fourth identity, seeded from the character-wise XOR fold of
/// all three digests, resolves it. Altering any link re-rolls the
/// background without necessarily touching the other robots.
#[derive(Debug, Clone)]
pub struct Armada {
    lead: Avatar,
    port: Avatar,
    starboard: Avatar,
    backdrop_seed: Avatar,
}

impl Armada {
    pub fn from_text(text: &str, digests: &dyn DigestGenerator) -> Result<Self, RenderError> {
        Self::from_bytes(text.as_bytes(), digests)
    }

    pub fn from_bytes(bytes: &[u8], digests: &dyn DigestGenerator) -> Result<Self, RenderError> {
        if bytes.is_empty() {
            return Err(RenderError::EmptyInput);
        }
        let digest1 = digests.hex_digest(bytes);
        let digest2 = digests.hex_digest(digest1.as_bytes());
        let digest3 = digests.hex_digest(digest2.as_bytes());

        let fold = xor_fold(&xor_fold(digest1.as_bytes(), digest2.as_bytes()), digest3.as_bytes());
        let backdrop_seed = Avatar::from_digest(digests.hex_digest(&fold))?;

        Ok(Self {
            lead: Avatar::from_digest(digest1)?,
            port: Avatar::from_digest(digest2)?,
            starboard: Avatar::from_digest(digest3)?,
            backdrop_seed,
        })
    }
}

impl AvatarRenderer for Armada {
    fn render(
        &self,
        catalog: &dyn AssetCatalog,
        request: &RenderRequest,
    ) -> Result<RgbaImage, RenderError> {
        let (width, height) = (request.width, request.height);
        let port_w = (width as f64 * PORT_SCALE) as u32;
        let port_h = (height as f64 * PORT_SCALE) as u32;
        let starboard_w = (width as f64 * STARBOARD_SCALE) as u32;
        let starboard_h = (height as f64 * STARBOARD_SCALE) as u32;

        // Sub-avatars render with index-derived set and color, no
        // background and no options; the scene owns decoration.
        let lead = self.lead.render(catalog, &RenderRequest::sized(width, height))?;
        let port = self.port.render(catalog, &RenderRequest::sized(port_w, port_h))?;
        let starboard = self
            .starboard
            .render(catalog, &RenderRequest::sized(starboard_w, starboard_h))?;

        let background_file;
        let backdrop = match selection::resolve_background(
            self.backdrop_seed.identity(),
            catalog,
            request.background.as_deref(),
        )? {
            Background::None => Backdrop::None,
            Background::Color(color) => Backdrop::Fill(color),
            Background::Set(set) => {
                background_file =
                    layers::select_background_file(self.backdrop_seed.identity(), catalog, &set)?;
                Backdrop::Image(&background_file)
            }
        };

        let mut scene = compose::paint_backdrop(width, height, backdrop)?;

        let left = (width as f64 / 4.0 - width as f64 * 0.05) as i64;
        let right = (width as f64 / 4.0 + width as f64 * 0.1) as i64;
        compose::overlay_at(&mut scene, &port, -left, (height - port_h) as i64);
        compose::overlay_at(&mut scene, &starboard, right, (height - starboard_h) as i64);
        compose::overlay_at(&mut scene, &lead, 0, 0);

        postprocess::apply(&mut scene, request.options);
        Ok(scene)
    }
}

/// Character-wise XOR of `a` against `b`, the shorter operand wrapping by
/// index modulo. The result has `a`'s length.
fn xor_fold(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter()
        .enumerate()
        .map(|(i, &byte)| byte ^ b[i % b.len()])
        .collect()
}
