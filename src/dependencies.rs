//! Northbound / southbound dependency management for one application.
//!
//! For an application `A`, a dependency `X -> A` is northbound (something
//! depends on `A`) and `A -> Y` is southbound (`A` depends on something).

use crate::model::{Application, ApplicationDependency};
use indexmap::IndexSet;
use serde::Serialize;

/// Which side of the application a dependency sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Northbound,
    Southbound,
}

impl Direction {
    /// Label of a dependency as seen from this side: the other end's name.
    #[must_use]
    pub fn label(self, dependency: &ApplicationDependency) -> &str {
        match self {
            Self::Northbound => &dependency.from.name,
            Self::Southbound => &dependency.to.name,
        }
    }
}

/// A dependency paired with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyOption {
    pub label: String,
    pub value: ApplicationDependency,
}

impl DependencyOption {
    fn new(direction: Direction, value: ApplicationDependency) -> Self {
        Self {
            label: direction.label(&value).to_string(),
            value,
        }
    }
}

/// Dependencies pointing at `application` (`to == application`).
pub fn northbound(
    application: &Application,
    dependencies: &[ApplicationDependency],
) -> Vec<DependencyOption> {
    dependencies
        .iter()
        .filter(|d| d.to.id == application.id)
        .map(|d| DependencyOption::new(Direction::Northbound, d.clone()))
        .collect()
}

/// Dependencies leaving `application` (`from == application`).
pub fn southbound(
    application: &Application,
    dependencies: &[ApplicationDependency],
) -> Vec<DependencyOption> {
    dependencies
        .iter()
        .filter(|d| d.from.id == application.id)
        .map(|d| DependencyOption::new(Direction::Southbound, d.clone()))
        .collect()
}

/// Ids of applications already linked in either direction.
#[must_use]
pub fn existing_mapping_ids(
    northbound: &[DependencyOption],
    southbound: &[DependencyOption],
) -> IndexSet<u64> {
    southbound
        .iter()
        .map(|d| d.value.to.id)
        .chain(northbound.iter().map(|d| d.value.from.id))
        .collect()
}

fn candidates<'a>(
    application: &'a Application,
    applications: &'a [Application],
    existing: &'a IndexSet<u64>,
) -> impl Iterator<Item = &'a Application> {
    applications
        .iter()
        .filter(move |other| other.id != application.id && !existing.contains(&other.id))
}

/// Prospective `other -> application` dependencies for every unlinked application.
pub fn northbound_options(
    application: &Application,
    applications: &[Application],
    existing: &IndexSet<u64>,
) -> Vec<DependencyOption> {
    candidates(application, applications, existing)
        .map(|other| {
            DependencyOption::new(
                Direction::Northbound,
                ApplicationDependency::new(other.to_ref(), application.to_ref()),
            )
        })
        .collect()
}

/// Prospective `application -> other` dependencies for every unlinked application.
pub fn southbound_options(
    application: &Application,
    applications: &[Application],
    existing: &IndexSet<u64>,
) -> Vec<DependencyOption> {
    candidates(application, applications, existing)
        .map(|other| {
            DependencyOption::new(
                Direction::Southbound,
                ApplicationDependency::new(application.to_ref(), other.to_ref()),
            )
        })
        .collect()
}

/// A write needed to move from the current to the desired dependency set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum DependencyChange {
    Create(ApplicationDependency),
    Delete(ApplicationDependency),
}

/// Diff two dependency selections by endpoints.
///
/// Deletions come first, each in the order of its input.
pub fn plan_changes(
    current: &[ApplicationDependency],
    desired: &[ApplicationDependency],
) -> Vec<DependencyChange> {
    let deletes = current
        .iter()
        .filter(|c| !desired.iter().any(|d| d.same_edge(c)))
        .cloned()
        .map(DependencyChange::Delete);
    let creates = desired
        .iter()
        .filter(|d| !current.iter().any(|c| c.same_edge(d)))
        .cloned()
        .map(DependencyChange::Create);
    deletes.chain(creates).collect()
}

/// Save progress of one direction's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveState {
    pub is_being_saved: bool,
    pub save_error: Option<String>,
}

impl SaveState {
    pub fn start(&mut self) {
        self.is_being_saved = true;
        self.save_error = None;
    }

    pub fn finish(&mut self, result: Result<(), String>) {
        self.is_being_saved = false;
        self.save_error = result.err();
    }
}

/// Save state for both directions of the dependencies form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyFormState {
    pub north: SaveState,
    pub south: SaveState,
}

impl DependencyFormState {
    pub fn side_mut(&mut self, direction: Direction) -> &mut SaveState {
        match direction {
            Direction::Northbound => &mut self.north,
            Direction::Southbound => &mut self.south,
        }
    }

    /// The form may close once neither side is saving.
    #[must_use]
    pub const fn can_close(&self) -> bool {
        !self.north.is_being_saved && !self.south.is_being_saved
    }
}

/// Everything the dependencies view shows for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyOverview {
    pub application: String,
    pub northbound: Vec<DependencyOption>,
    pub southbound: Vec<DependencyOption>,
    pub northbound_options: Vec<DependencyOption>,
    pub southbound_options: Vec<DependencyOption>,
}

impl DependencyOverview {
    pub fn build(
        application: &Application,
        applications: &[Application],
        dependencies: &[ApplicationDependency],
    ) -> Self {
        let north = northbound(application, dependencies);
        let south = southbound(application, dependencies);
        let existing = existing_mapping_ids(&north, &south);
        Self {
            application: application.name.clone(),
            northbound_options: northbound_options(application, applications, &existing),
            southbound_options: southbound_options(application, applications, &existing),
            northbound: north,
            southbound: south,
        }
    }
}
