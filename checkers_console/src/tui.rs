use checkers_p2p::board::Move;
use checkers_p2p::coord::{Col, Coord, Row};
use checkers_p2p::grid::Grid;
use checkers_p2p::piece::piece_to_pictogram;
use console::Style;
use itertools::Itertools;


// Local pieces are at the bottom. Headers show the zero-based indices used by the `<row> <col>`
// command.
pub fn render_grid(grid: &Grid, selected: Option<Coord>, highlighted: &[Move]) -> String {
    let light = Style::new().color256(233).on_color256(230);
    let dark = Style::new().color256(233).on_color256(137);
    let selected_style = Style::new().color256(233).on_color256(220);
    let target_style = Style::new().color256(233).on_color256(107);
    let col_labels = Col::all().map(|col| format_square_label(col.to_zero_based())).join("");
    let header = format!("   {col_labels}\n");
    let mut ret = header.clone();
    for row in Row::all() {
        ret.push_str(&format_square_label(row.to_zero_based()));
        for col in Col::all() {
            let coord = Coord::new(row, col);
            let style = if selected == Some(coord) {
                &selected_style
            } else if highlighted.iter().any(|mv| mv.dest == coord) {
                &target_style
            } else if coord.is_dark() {
                &dark
            } else {
                &light
            };
            let ch = grid[coord].map_or(' ', piece_to_pictogram);
            ret.push_str(&style.apply_to(format_square(ch)).to_string());
        }
        ret.push_str(&format_square_label(row.to_zero_based()));
        ret.push('\n');
    }
    ret.push_str(&header);
    ret
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }
fn format_square_label(idx: u8) -> String { format!(" {} ", idx) }
