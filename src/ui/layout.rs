use ratatui::layout::Rect;

/// Screen regions, top to bottom.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Regions {
    pub header: Rect,
    pub body: Rect,
    pub stats: Rect,
    pub footer: Rect,
}

pub fn layout_regions(area: Rect) -> Regions {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let stats_height = 3.min(area.height.saturating_sub(header_height + footer_height));
    let body_height = area
        .height
        .saturating_sub(header_height + footer_height + stats_height);

    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: body_height,
    };
    let stats = Rect {
        x: area.x,
        y: body.y + body_height,
        width: area.width,
        height: stats_height,
    };
    let footer = Rect {
        x: area.x,
        y: stats.y + stats_height,
        width: area.width,
        height: footer_height,
    };
    Regions {
        header,
        body,
        stats,
        footer,
    }
}

/// Rectangle of `width` x `height` centered in `area`, clamped to it.
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
