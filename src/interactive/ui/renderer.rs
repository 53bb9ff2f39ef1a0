use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::controller::{BannerKind, SearchController, UiStatus};
use crate::interactive::constants::{
    DIALOG_HEIGHT, DIALOG_MAX_WIDTH, FORM_HEIGHT, HEADER_HEIGHT, HELP_DIALOG_MARGIN,
    HELP_DIALOG_MAX_WIDTH, STATUS_BAR_HEIGHT,
};
use crate::interactive::ui::components::{
    Component, filter_form::FilterForm, help_dialog::HelpDialog, payment_dialog::PaymentDialog,
    relay_list::RelayList,
};
use crate::interactive::ui::view_state::{Focus, ViewState};

pub struct Renderer {
    filter_form: FilterForm,
    relay_list: RelayList,
    payment_dialog: PaymentDialog,
    help_dialog: HelpDialog,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            filter_form: FilterForm::new(),
            relay_list: RelayList::new(),
            payment_dialog: PaymentDialog::new(),
            help_dialog: HelpDialog::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, controller: &SearchController, view: &ViewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(f.area());

        self.render_header(f, chunks[0], controller);

        self.filter_form.set_query(controller.query().clone());
        self.filter_form
            .set_countries(controller.countries().to_vec());
        self.filter_form.render(f, chunks[1]);

        self.relay_list.set_status(controller.status());
        self.relay_list.set_relays(
            controller
                .data()
                .map(|set| set.results.clone())
                .unwrap_or_default(),
        );
        self.relay_list.set_selected(view.selected_relay);
        self.relay_list.render(f, chunks[2]);

        self.render_status_bar(f, chunks[3], view);

        if view.dialog_open {
            self.payment_dialog
                .set_address(controller.payment_address().to_string());
            self.payment_dialog.set_input(view.check_input.clone());
            self.payment_dialog
                .set_banner(view.banner.as_ref().map(|t| t.banner.clone()));
            let area = centered(f.area(), DIALOG_MAX_WIDTH, DIALOG_HEIGHT);
            self.payment_dialog.render(f, area);
        }

        if view.help_open {
            let area = centered(
                f.area(),
                HELP_DIALOG_MAX_WIDTH,
                f.area().height.saturating_sub(HELP_DIALOG_MARGIN * 2),
            );
            self.help_dialog.render(f, area);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect, controller: &SearchController) {
        let status = match controller.status() {
            UiStatus::Hidden => "",
            UiStatus::Loading => "[loading...]",
            UiStatus::Loaded => "[loaded]",
            UiStatus::ResultEmpty => "[no results]",
            UiStatus::Warn => "[warning]",
            UiStatus::Success => "[success]",
        };

        let lines = vec![
            Line::from(Span::styled(
                "relaytip — donate to Tor relay operators",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(status, Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "  consensus: {}  ",
                    controller.last_refreshed()
                )),
                Span::styled(
                    controller.share_link(),
                    Style::default().fg(Color::Blue),
                ),
            ]),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, view: &ViewState) {
        let line = if let Some(timed) = &view.banner {
            let style = match timed.banner.kind {
                BannerKind::Success => Style::default().fg(Color::Green),
                BannerKind::Warning => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(timed.banner.text.clone(), style))
        } else {
            let focus = match view.focus {
                Focus::Form => "form",
                Focus::Results => "results",
            };
            Line::from(Span::styled(
                format!("focus: {focus}   Tab: switch   ?: help   Ctrl+C twice: quit"),
                Style::default().fg(Color::DarkGray),
            ))
        };
        f.render_widget(Paragraph::new(line), area);
    }

    pub fn get_filter_form_mut(&mut self) -> &mut FilterForm {
        &mut self.filter_form
    }

    pub fn get_relay_list_mut(&mut self) -> &mut RelayList {
        &mut self.relay_list
    }

    pub fn get_payment_dialog_mut(&mut self) -> &mut PaymentDialog {
        &mut self.payment_dialog
    }

    pub fn get_help_dialog_mut(&mut self) -> &mut HelpDialog {
        &mut self.help_dialog
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn centered(area: Rect, max_width: u16, height: u16) -> Rect {
    let width = max_width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
