// Custom gesture templates
// User-recorded reference poses, matched by nearest mean per-point distance

use std::collections::BTreeMap;

use crate::gestures::types::GestureTemplate;
use crate::landmarks::NormalizedPose;

/// Named gesture templates, kept in name order
///
/// Name order makes matching deterministic: on equal distance the
/// lexicographically first name wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateLibrary {
    templates: BTreeMap<String, GestureTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        TemplateLibrary::default()
    }

    /// Insert a template, replacing any template with the same name
    pub fn insert(&mut self, template: GestureTemplate) -> Option<GestureTemplate> {
        self.templates.insert(template.name.clone(), template)
    }

    pub fn remove(&mut self, name: &str) -> Option<GestureTemplate> {
        self.templates.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&GestureTemplate> {
        self.templates.get(name)
    }

    /// Case-sensitive name lookup
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureTemplate> {
        self.templates.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<GestureTemplate> for TemplateLibrary {
    fn from_iter<T: IntoIterator<Item = GestureTemplate>>(iter: T) -> Self {
        let mut library = TemplateLibrary::new();
        for template in iter {
            library.insert(template);
        }
        library
    }
}

/// Closest template to an observed pose
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch {
    pub name: String,

    /// Mean per-point distance in normalized units
    pub distance: f32,
}

/// Find the template with the smallest mean distance to `pose`
///
/// Returns `None` for an empty library.
pub fn nearest_template(pose: &NormalizedPose, library: &TemplateLibrary) -> Option<TemplateMatch> {
    let mut best: Option<TemplateMatch> = None;

    for template in library.iter() {
        let distance = pose.mean_distance_to(&template.pose);
        let better = match &best {
            Some(current) => distance < current.distance,
            None => !distance.is_nan(),
        };
        if better {
            best = Some(TemplateMatch {
                name: template.name.clone(),
                distance,
            });
        }
    }

    best
}

/// Nearest template, accepted only when its distance is below `threshold`
pub fn match_template(
    pose: &NormalizedPose,
    library: &TemplateLibrary,
    threshold: f32,
) -> Option<TemplateMatch> {
    nearest_template(pose, library).filter(|m| m.distance < threshold)
}
