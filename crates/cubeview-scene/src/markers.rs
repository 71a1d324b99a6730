//! Transient dimension arrows
//!
//! A marker is spawned at the cube's position when a [`ViewerCommand::ShowMarker`]
//! arrives and despawned once its lifetime has elapsed on the real clock.
//! Frame rate and virtual-time pauses do not affect the deadline.

use bevy::prelude::*;
use bevy::time::Real;
use cubeview_core::{ArrowProportions, Dimension, MarkerSchedule, MarkerSpec};

use crate::cube::ViewerCube;
use crate::types::{ViewerCommand, ViewerSettings};

/// Root entity of a marker arrow (shaft and head are children)
#[derive(Component, Debug, Clone)]
pub struct DimensionMarker {
    pub spec: MarkerSpec,
}

/// Live markers and their removal deadlines
#[derive(Resource, Debug, Default)]
pub struct LiveMarkers(pub MarkerSchedule<Entity>);

/// Meshes and per-dimension materials shared by all marker arrows
#[derive(Resource, Debug, Clone)]
pub struct MarkerAssets {
    pub shaft: Handle<Mesh>,
    pub head: Handle<Mesh>,
    pub proportions: ArrowProportions,
    pub height: Handle<StandardMaterial>,
    pub width: Handle<StandardMaterial>,
    pub depth: Handle<StandardMaterial>,
}

impl MarkerAssets {
    pub fn new(
        length: f32,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        let proportions = ArrowProportions::for_length(length);
        let mut material_for = |dimension: Dimension| {
            let [r, g, b] = dimension.color_rgb();
            materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, b),
                unlit: true,
                ..default()
            })
        };

        Self {
            shaft: meshes.add(Cylinder::new(proportions.shaft_radius, proportions.shaft_length)),
            head: meshes.add(Cone::new(proportions.head_radius, proportions.head_length)),
            proportions,
            height: material_for(Dimension::Height),
            width: material_for(Dimension::Width),
            depth: material_for(Dimension::Depth),
        }
    }

    pub fn material(&self, dimension: Dimension) -> Handle<StandardMaterial> {
        match dimension {
            Dimension::Height => self.height.clone(),
            Dimension::Width => self.width.clone(),
            Dimension::Depth => self.depth.clone(),
        }
    }
}

/// Spawn the arrow for `spec`: shaft along local +Y, cone on top, root rotated onto the direction
pub fn spawn_marker(commands: &mut Commands, assets: &MarkerAssets, spec: MarkerSpec) -> Entity {
    let direction = Vec3::from_array(spec.direction);
    let rotation = Quat::from_rotation_arc(Vec3::Y, direction);
    let p = assets.proportions;
    let material = assets.material(spec.dimension);

    commands
        .spawn((
            DimensionMarker { spec },
            Transform::from_translation(Vec3::from_array(spec.anchor)).with_rotation(rotation),
            Visibility::default(),
        ))
        .with_children(|arrow| {
            arrow.spawn((
                Mesh3d(assets.shaft.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, p.shaft_length / 2.0, 0.0),
            ));
            arrow.spawn((
                Mesh3d(assets.head.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, p.shaft_length + p.head_length / 2.0, 0.0),
            ));
        })
        .id()
}

/// Detach a marker from the scene. Absent markers are ignored.
pub fn remove_marker(commands: &mut Commands, live: &mut LiveMarkers, entity: Entity) -> bool {
    if !live.0.remove(entity) {
        return false;
    }
    commands.entity(entity).try_despawn();
    true
}

pub(crate) fn show_markers(
    mut commands: Commands,
    mut requests: MessageReader<ViewerCommand>,
    mut live: ResMut<LiveMarkers>,
    assets: Res<MarkerAssets>,
    settings: Res<ViewerSettings>,
    time: Res<Time<Real>>,
    cubes: Query<&Transform, With<ViewerCube>>,
) {
    for command in requests.read() {
        let ViewerCommand::ShowMarker(dimension) = command else {
            continue;
        };
        let Ok(cube) = cubes.single() else {
            tracing::warn!("No cube in scene, dropping {} marker", dimension);
            continue;
        };

        let spec = MarkerSpec::new(*dimension, cube.translation.to_array(), settings.0.markers.length);
        let entity = spawn_marker(&mut commands, &assets, spec);
        live.0.insert(entity, time.elapsed());
        tracing::debug!("Showing {} marker {:?}", dimension, entity);
    }
}

pub(crate) fn expire_markers(
    mut commands: Commands,
    mut live: ResMut<LiveMarkers>,
    time: Res<Time<Real>>,
) {
    for entity in live.0.expired(time.elapsed()) {
        if remove_marker(&mut commands, &mut live, entity) {
            tracing::debug!("Marker {:?} expired", entity);
        }
    }
}

/// Cancel pending removals on shutdown so no deadline fires against a torn-down scene
pub(crate) fn cancel_markers_on_exit(
    mut commands: Commands,
    mut exits: MessageReader<AppExit>,
    mut live: ResMut<LiveMarkers>,
) {
    if exits.read().next().is_none() {
        return;
    }

    let cancelled = live.0.cancel_all();
    for entity in &cancelled {
        commands.entity(*entity).try_despawn();
    }
    if !cancelled.is_empty() {
        tracing::info!("Cancelled {} pending marker removals", cancelled.len());
    }
}
