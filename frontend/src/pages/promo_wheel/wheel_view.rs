use shared::shared_wheel_game::{segment_under_pointer, DISPLAY_SEGMENTS, SEGMENT_SWEEP};
use yew::prelude::*;

use crate::styles;

const SIZE: f64 = 300.0;
const CENTER: f64 = SIZE / 2.0;
const RADIUS: f64 = SIZE / 2.0 - 6.0;
const LABEL_RADIUS: f64 = RADIUS * 0.62;

const SEGMENT_COLORS: [&str; 6] = ["#f9a8d4", "#fdba74", "#fde68a", "#c4b5fd", "#86efac", "#f472b6"];

// Angles are degrees clockwise from 12 o'clock, matching the pointer
fn point_at(angle: f64, radius: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (CENTER + radius * rad.sin(), CENTER - radius * rad.cos())
}

fn wedge_path(start: f64, end: f64) -> String {
    let (x0, y0) = point_at(start, RADIUS);
    let (x1, y1) = point_at(end, RADIUS);
    format!(
        "M {c} {c} L {x0:.3} {y0:.3} A {r} {r} 0 0 1 {x1:.3} {y1:.3} Z",
        c = CENTER,
        r = RADIUS,
    )
}

#[derive(Properties, PartialEq)]
pub struct WheelViewProps {
    pub rotation: f64,
    /// CSS transition applied to the rotation change, `None` for an instant jump.
    pub transition: Option<String>,
    pub spinning: bool,
    pub on_spin: Callback<MouseEvent>,
}

#[function_component(WheelView)]
pub fn wheel_view(props: &WheelViewProps) -> Html {
    let style = format!(
        "transform: rotate({:.3}deg); transform-origin: 50% 50%; transition: {};",
        props.rotation,
        props.transition.as_deref().unwrap_or("none")
    );

    let resting_label = if props.spinning {
        "Wheel spinning".to_string()
    } else {
        format!("Wheel resting on {}", segment_under_pointer(props.rotation).label)
    };

    html! {
        <div class="flex flex-col items-center">
            <div class="relative w-full max-w-[320px] mx-auto mb-8" role="img" aria-label={resting_label}>
                <div class="absolute left-1/2 -translate-x-1/2 -top-2 z-10 w-0 h-0 border-l-[14px] border-r-[14px] border-t-[26px] border-l-transparent border-r-transparent border-t-gray-800 dark:border-t-white"></div>
                <div style={style}>
                    <svg viewBox={format!("0 0 {} {}", SIZE, SIZE)} class="w-full h-auto drop-shadow-xl">
                        {
                            for DISPLAY_SEGMENTS.iter().enumerate().map(|(i, segment)| {
                                let start = segment.center_angle - SEGMENT_SWEEP / 2.0;
                                let end = segment.center_angle + SEGMENT_SWEEP / 2.0;
                                let (lx, ly) = point_at(0.0, LABEL_RADIUS);
                                html! {
                                    <g key={segment.label}>
                                        <path
                                            d={wedge_path(start, end)}
                                            fill={SEGMENT_COLORS[i % SEGMENT_COLORS.len()]}
                                            stroke="#ffffff"
                                            stroke-width="2"
                                        />
                                        <text
                                            x={format!("{:.3}", lx)}
                                            y={format!("{:.3}", ly)}
                                            transform={format!("rotate({} {} {})", segment.center_angle, CENTER, CENTER)}
                                            text-anchor="middle"
                                            dominant-baseline="middle"
                                            font-size="13"
                                            font-weight="600"
                                            fill="#1f2937"
                                        >
                                            {segment.label}
                                        </text>
                                    </g>
                                }
                            })
                        }
                        <circle cx={CENTER.to_string()} cy={CENTER.to_string()} r="18" fill="#ffffff" stroke="#1f2937" stroke-width="3" />
                    </svg>
                </div>
            </div>
            <button class={styles::BUTTON_PRIMARY} onclick={props.on_spin.clone()} disabled={props.spinning}>
                { if props.spinning { "SPINNING..." } else { "SPIN" } }
            </button>
            <p class={classes!(styles::TEXT_SMALL, "mt-3")}>{"Press Enter to spin, Escape to start over"}</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_compass() {
        let (x, y) = point_at(0.0, 10.0);
        assert!((x - CENTER).abs() < 1e-9 && (y - (CENTER - 10.0)).abs() < 1e-9);
        let (x, y) = point_at(90.0, 10.0);
        assert!((x - (CENTER + 10.0)).abs() < 1e-9 && (y - CENTER).abs() < 1e-9);
    }

    #[test]
    fn test_wedge_path_shape() {
        let path = wedge_path(0.0, 60.0);
        assert!(path.starts_with("M 150 150 L 150.000 6.000 A 144 144 0 0 1"));
        assert!(path.ends_with(" Z"));
    }
}
