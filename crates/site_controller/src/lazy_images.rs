use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub image_id: String,
    pub is_intersecting: bool,
}

/// Instruction to replace an image's placeholder with its real source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSwap {
    pub image_id: String,
    pub src: String,
}

/// Tracks images that still carry a deferred source. Each image is swapped at
/// most once and is unobserved as soon as it is.
#[derive(Debug, Default)]
pub struct LazyImageLoader {
    pending: HashMap<String, String>,
}

impl LazyImageLoader {
    pub fn observe(&mut self, image_id: impl Into<String>, deferred_src: impl Into<String>) {
        self.pending.insert(image_id.into(), deferred_src.into());
    }

    pub fn is_observing(&self, image_id: &str) -> bool {
        self.pending.contains_key(image_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn on_intersection(&mut self, entries: &[IntersectionEntry]) -> Vec<SourceSwap> {
        entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .filter_map(|entry| {
                self.pending
                    .remove(&entry.image_id)
                    .map(|src| SourceSwap {
                        image_id: entry.image_id.clone(),
                        src,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            image_id: id.to_string(),
            is_intersecting,
        }
    }

    #[test]
    fn visible_image_is_swapped_once() {
        let mut loader = LazyImageLoader::default();
        loader.observe("hero", "img/hero.webp");

        let swaps = loader.on_intersection(&[entry("hero", true)]);
        assert_eq!(
            swaps,
            vec![SourceSwap {
                image_id: "hero".into(),
                src: "img/hero.webp".into()
            }]
        );
        assert!(!loader.is_observing("hero"));
        assert!(loader.on_intersection(&[entry("hero", true)]).is_empty());
    }

    #[test]
    fn offscreen_and_unknown_images_are_ignored() {
        let mut loader = LazyImageLoader::default();
        loader.observe("a", "a.png");
        loader.observe("b", "b.png");

        let swaps = loader.on_intersection(&[
            entry("a", false),
            entry("zzz", true),
            entry("b", true),
        ]);
        assert_eq!(swaps.len(), 1);
        assert_eq!(swaps[0].image_id, "b");
        assert!(loader.is_observing("a"));
        assert_eq!(loader.pending_count(), 1);
    }
}
