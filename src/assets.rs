//! Fixed external assets: the greenhouse map embed and the plant gallery.

use serde::{Deserialize, Serialize};

const OSM_EMBED: &str = "https://www.openstreetmap.org/export/embed.html";

/// OpenStreetMap iframe embed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEmbed {
    /// `(west, south, east, north)` in degrees.
    pub bbox: (f64, f64, f64, f64),
    /// `(lat, lon)` in degrees.
    pub marker: (f64, f64),
    pub layer: String,
}

impl Default for MapEmbed {
    fn default() -> Self {
        Self {
            bbox: (-68.210, -22.915, -68.188, -22.902),
            marker: (-22.9083, -68.1992),
            layer: "mapnik".to_string(),
        }
    }
}

impl MapEmbed {
    /// Embed URL with commas encoded as `%2C`.
    pub fn url(&self) -> String {
        let (w, s, e, n) = self.bbox;
        let (lat, lon) = self.marker;
        format!(
            "{}?bbox={}%2C{}%2C{}%2C{}&layer={}&marker={}%2C{}",
            OSM_EMBED, w, s, e, n, self.layer, lat, lon
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantStatus {
    Ok,
    Alert,
}

/// One plant card in the gallery carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    /// Crop water stress index.
    pub cswi: f64,
    pub ndvi: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    pub status: PlantStatus,
}

fn unsplash(photo: &str) -> String {
    format!(
        "https://images.unsplash.com/{}?auto=format&fit=crop&w=400&q=80",
        photo
    )
}

/// The four-plant gallery.
pub fn plant_gallery() -> Vec<GalleryItem> {
    let item = |id, name: &str, photo, cswi, ndvi, temperature, status| GalleryItem {
        id,
        name: name.to_string(),
        image_url: unsplash(photo),
        cswi,
        ndvi,
        temperature,
        status,
    };
    vec![
        item(1, "Quinoa Andina", "photo-1506744038136-46273834b3fb", 0.87, 0.76, 18.5, PlantStatus::Ok),
        item(2, "Flor del Desierto", "photo-1464983953574-0892a716854b", 0.92, 0.82, 16.2, PlantStatus::Ok),
        item(3, "Cactus Atacameño", "photo-1501004318641-b39e6451bec6", 0.68, 0.71, 22.1, PlantStatus::Alert),
        item(4, "Lirio Silvestre", "photo-1465101046530-73398c7f28ca", 0.95, 0.89, 19.8, PlantStatus::Ok),
    ]
}

/// Carousel position over a gallery of `len` items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carousel {
    pub index: usize,
    pub len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Step forward, wrapping to the first item.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Step back, wrapping to the last item.
    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_url() {
        let url = MapEmbed::default().url();
        assert_eq!(
            url,
            "https://www.openstreetmap.org/export/embed.html?bbox=-68.21%2C-22.915%2C-68.188%2C-22.902&layer=mapnik&marker=-22.9083%2C-68.1992"
        );
    }

    #[test]
    fn test_gallery() {
        let gallery = plant_gallery();
        assert_eq!(gallery.len(), 4);
        assert_eq!(gallery[2].status, PlantStatus::Alert);
        assert!(gallery[0].image_url.starts_with("https://images.unsplash.com/photo-1506744038136"));
    }

    #[test]
    fn test_carousel_wraps() {
        let mut c = Carousel::new(4);
        assert_eq!(c.previous(), 3);
        assert_eq!(c.next(), 0);
        c.index = 3;
        assert_eq!(c.next(), 0);

        let mut empty = Carousel::new(0);
        assert_eq!(empty.next(), 0);
    }
}
