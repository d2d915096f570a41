use crate::measurement::MeasurementResult;
use crate::tools::measure::MeasureTool;
use bevy::prelude::*;

#[derive(Component)]
pub struct MeasurementReadout;

/// One-line summary of a measurement, `-` for values not yet defined.
pub fn format_readout(result: &MeasurementResult, active: bool) -> String {
    let fmt = |v: Option<f64>, unit: &str| match v {
        Some(v) => format!("{v:.2} {unit}"),
        None => "-".to_string(),
    };
    let last = result
        .distances
        .as_ref()
        .and_then(|d| d.last().copied());

    format!(
        "{} | Points: {} | Last: {} | Perimeter: {} | Area: {}",
        if active { "MEASURING" } else { "IDLE (M to start)" },
        result.points.len(),
        fmt(last, "m"),
        fmt(result.perimeter, "m"),
        fmt(result.area, "m²"),
    )
}

pub fn spawn_readout(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(format_readout(&MeasurementResult::default(), false)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                MeasurementReadout,
            ));
        });
}

pub fn readout_update_system(
    measure_tool: Res<MeasureTool>,
    mut query: Query<&mut Text, With<MeasurementReadout>>,
) {
    if !measure_tool.is_changed() {
        return;
    }
    let line = format_readout(&measure_tool.measurement(), measure_tool.is_active());
    for mut text in &mut query {
        text.0 = line.clone();
    }
}
