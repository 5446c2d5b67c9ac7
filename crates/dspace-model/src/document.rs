use crate::descriptors::{ExportsPayload, LayerDescriptor};
use crate::ids::LayerId;

/// A layer as far as exporting is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub id: LayerId,
    pub name: Option<String>,
    pub artboard: bool,
    pub export_enabled: bool,
}

impl Layer {
    pub fn new(id: LayerId) -> Self {
        Self {
            id,
            name: None,
            artboard: false,
            export_enabled: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn artboard(mut self, artboard: bool) -> Self {
        self.artboard = artboard;
        self
    }

    #[must_use]
    pub fn export_enabled(mut self, enabled: bool) -> Self {
        self.export_enabled = enabled;
        self
    }

    /// Name used for exported files; falls back to the layer id.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("layer-{}", self.id),
        }
    }

    fn matches(&self, artboards: Option<bool>, export_enabled: Option<bool>) -> bool {
        artboards.is_none_or(|wanted| self.artboard == wanted)
            && export_enabled.is_none_or(|wanted| self.export_enabled == wanted)
    }
}

impl From<&LayerDescriptor> for Layer {
    fn from(descriptor: &LayerDescriptor) -> Self {
        Self {
            id: descriptor.layer_id,
            name: descriptor.name.clone(),
            artboard: descriptor.artboard,
            export_enabled: descriptor.export_enabled,
        }
    }
}

/// An open document's layer set, in the host's native order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub id: Option<u32>,
    pub name: Option<String>,
    layers: Vec<Layer>,
}

impl Document {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self {
            id: None,
            name: None,
            layers,
        }
    }

    pub fn from_payload(payload: &ExportsPayload) -> Self {
        Self {
            id: payload.document.document_id,
            name: payload.document.name.clone(),
            layers: payload.layers.iter().map(Layer::from).collect(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Layers in native order, restricted by the artboard and export-enabled
    /// flags. `None` leaves the corresponding flag unconstrained.
    pub fn filter_layers(
        &self,
        artboards: Option<bool>,
        export_enabled: Option<bool>,
    ) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(move |layer| layer.matches(artboards, export_enabled))
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| "Untitled".to_string())
    }
}
