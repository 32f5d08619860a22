use ratatui::layout::Rect;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const SEARCH_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(HEADER_HEIGHT);
    let footer_height = FOOTER_HEIGHT.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Splits the body into search box, card list and status line.
pub fn body_regions(body: Rect) -> (Rect, Rect, Rect) {
    let search_height = body.height.min(SEARCH_HEIGHT);
    let status_height = STATUS_HEIGHT.min(body.height.saturating_sub(search_height));
    let search = Rect {
        height: search_height,
        ..body
    };
    let status = Rect {
        y: body.y + body.height.saturating_sub(status_height),
        height: status_height,
        ..body
    };
    let list = Rect {
        y: body.y + search_height,
        height: body.height.saturating_sub(search_height + status_height),
        ..body
    };
    (search, list, status)
}

/// Card list area for a terminal of `cols` x `rows`.
pub fn list_rect(cols: u16, rows: u16) -> Rect {
    let (_, body, _) = layout_regions(Rect {
        x: 0,
        y: 0,
        width: cols,
        height: rows,
    });
    body_regions(body).1
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
