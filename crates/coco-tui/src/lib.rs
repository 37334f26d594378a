// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use coco_app::{
    AppCommand, AppState, Case, CaseWorkflow, CoachVisibility, Evaluation, IntakeForm, KpiSummary,
    MenuVisibility, ObjectionKind, Patient, PaymentMethod, PresetKind, ProposalInputs,
    RevenuePoint, TreatmentKind, ViewKind, WorkflowCommand, WorkflowStep,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::{Date, OffsetDateTime, Weekday};

const STEP_DONE_MARK: &str = "[x]";
const STEP_CURRENT_MARK: &str = "[>]";
const STEP_PENDING_MARK: &str = "[ ]";
const FIELD_CURSOR: &str = ">";
const REVENUE_BAR: &str = "#";
const REVENUE_BAR_WIDTH: i64 = 16;

/// The in-process boundary standing in for a backend case/patient API.
pub trait AppRuntime {
    fn load_kpi_summary(&mut self) -> Result<KpiSummary>;
    fn load_revenue_week(&mut self) -> Result<Vec<RevenuePoint>>;
    fn load_active_negotiations(&mut self) -> Result<Vec<Case>>;
    fn load_recall_queue(&mut self) -> Result<Vec<Case>>;
    fn load_workflow_patient(&mut self) -> Result<Patient>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntakeField {
    FirstName,
    LastName,
    Treatment,
}

impl IntakeField {
    const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::Treatment];

    const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Treatment => "treatment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProposalField {
    DownPayment,
    TermMonths,
    Insurance,
}

impl ProposalField {
    const ALL: [Self; 3] = [Self::DownPayment, Self::TermMonths, Self::Insurance];

    const fn label(self) -> &'static str {
        match self {
            Self::DownPayment => "down payment",
            Self::TermMonths => "term length",
            Self::Insurance => "insurance estimate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProposalUiState {
    inputs: ProposalInputs,
    field: ProposalField,
}

impl ProposalUiState {
    fn for_treatment_cost(treatment_cost_cents: i64) -> Self {
        Self {
            inputs: ProposalInputs::for_preset(treatment_cost_cents, PresetKind::Balanced),
            field: ProposalField::DownPayment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CoachUiState {
    selected: Option<ObjectionKind>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct DashboardData {
    kpis: KpiSummary,
    revenue: Vec<RevenuePoint>,
    negotiations: Vec<Case>,
    recall: Vec<Case>,
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    now: OffsetDateTime,
    dashboard: DashboardData,
    patient: Option<Patient>,
    intake: IntakeForm,
    intake_field: IntakeField,
    workflow: CaseWorkflow,
    proposal_ui: ProposalUiState,
    payment_method: PaymentMethod,
    coach: CoachUiState,
    help_visible: bool,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        let intake = IntakeForm::default();
        let proposal_ui = ProposalUiState::for_treatment_cost(intake.treatment_cost_cents());
        Self {
            now: OffsetDateTime::UNIX_EPOCH,
            dashboard: DashboardData::default(),
            patient: None,
            intake,
            intake_field: IntakeField::FirstName,
            workflow: CaseWorkflow::default(),
            proposal_ui,
            payment_method: PaymentMethod::CreditCard,
            coach: CoachUiState::default(),
            help_visible: false,
            status_token: 0,
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(runtime, &mut view_data) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn refresh_view_data<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.now = OffsetDateTime::now_utc();
    view_data.dashboard = DashboardData {
        kpis: runtime.load_kpi_summary()?,
        revenue: runtime.load_revenue_week()?,
        negotiations: runtime.load_active_negotiations()?,
        recall: runtime.load_recall_queue()?,
    };

    let patient = runtime.load_workflow_patient()?;
    if view_data.intake.first_name.is_empty() && view_data.intake.last_name.is_empty() {
        let mut parts = patient.name.splitn(2, ' ');
        view_data.intake.first_name = parts.next().unwrap_or_default().to_owned();
        view_data.intake.last_name = parts.next().unwrap_or_default().to_owned();
        if let Some(treatment) = patient.treatment {
            view_data.intake.treatment = treatment;
        }
    }
    view_data.patient = Some(patient);
    Ok(())
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if state.coach == CoachVisibility::Visible {
        handle_coach_key(state, view_data, key);
        return false;
    }

    if state.menu == MenuVisibility::Visible {
        handle_menu_key(state, key);
        return false;
    }

    // While a name field has focus, printable keys belong to the form.
    let editing_text = state.view == ViewKind::CaseWorkflow
        && view_data.workflow.step == WorkflowStep::Intake
        && view_data.intake_field != IntakeField::Treatment;

    match (key.code, key.modifiers) {
        (KeyCode::Char('?'), _) if !editing_text => {
            view_data.help_visible = true;
            return false;
        }
        (KeyCode::Char('@'), _) if !editing_text => {
            state.dispatch(AppCommand::OpenCoach);
            return false;
        }
        (KeyCode::Char('m'), KeyModifiers::NONE) if !editing_text => {
            state.dispatch(AppCommand::OpenMenu);
            return false;
        }
        (KeyCode::Tab, _) => {
            state.dispatch(AppCommand::NextView);
            return false;
        }
        (KeyCode::BackTab, _) => {
            state.dispatch(AppCommand::PrevView);
            return false;
        }
        (KeyCode::Char('n'), KeyModifiers::NONE) if state.view != ViewKind::CaseWorkflow => {
            start_new_case(state, view_data, internal_tx);
            return false;
        }
        _ => {}
    }

    match state.view {
        ViewKind::Dashboard => {
            if key.code == KeyCode::Char('r') {
                match refresh_view_data(runtime, view_data) {
                    Ok(()) => emit_status(state, view_data, internal_tx, "dashboard refreshed"),
                    Err(error) => {
                        emit_status(state, view_data, internal_tx, format!("load failed: {error}"));
                    }
                }
            }
        }
        ViewKind::CaseWorkflow => {
            handle_workflow_key(state, view_data, internal_tx, key);
        }
        ViewKind::Team | ViewKind::Settings => {}
    }
    false
}

fn start_new_case(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    state.dispatch(AppCommand::SelectView(ViewKind::CaseWorkflow));
    view_data.workflow.dispatch(WorkflowCommand::Reset);
    view_data.intake = IntakeForm::default();
    view_data.intake_field = IntakeField::FirstName;
    view_data.proposal_ui =
        ProposalUiState::for_treatment_cost(view_data.intake.treatment_cost_cents());
    view_data.payment_method = PaymentMethod::CreditCard;
    emit_status(state, view_data, internal_tx, "new case started");
}

fn handle_menu_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.dispatch(AppCommand::CloseMenu);
        }
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            state.dispatch(AppCommand::SelectView(ViewKind::ALL[index]));
        }
        _ => {}
    }
}

fn handle_coach_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            view_data.coach.selected = None;
            state.dispatch(AppCommand::CloseCoach);
        }
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            view_data.coach.selected = Some(ObjectionKind::ALL[index]);
        }
        _ => {}
    }
}

fn handle_workflow_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match view_data.workflow.step {
        WorkflowStep::Intake => handle_intake_key(state, view_data, internal_tx, key),
        WorkflowStep::Proposal => handle_proposal_key(state, view_data, internal_tx, key),
        WorkflowStep::Contract => handle_contract_key(state, view_data, internal_tx, key),
        WorkflowStep::Payment => handle_payment_key(state, view_data, internal_tx, key),
    }
}

fn handle_intake_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Up => {
            view_data.intake_field = move_cursor(&IntakeField::ALL, view_data.intake_field, -1);
        }
        KeyCode::Down => {
            view_data.intake_field = move_cursor(&IntakeField::ALL, view_data.intake_field, 1);
        }
        KeyCode::Left | KeyCode::Right if view_data.intake_field == IntakeField::Treatment => {
            let delta = if key.code == KeyCode::Left { -1 } else { 1 };
            view_data.intake.treatment =
                move_cursor(&TreatmentKind::ALL, view_data.intake.treatment, delta);
        }
        KeyCode::Char(ch) => match view_data.intake_field {
            IntakeField::FirstName => view_data.intake.first_name.push(ch),
            IntakeField::LastName => view_data.intake.last_name.push(ch),
            IntakeField::Treatment => {}
        },
        KeyCode::Backspace => match view_data.intake_field {
            IntakeField::FirstName => {
                view_data.intake.first_name.pop();
            }
            IntakeField::LastName => {
                view_data.intake.last_name.pop();
            }
            IntakeField::Treatment => {}
        },
        KeyCode::Enter => match view_data.intake.validate() {
            Ok(()) => {
                // The builder remounts fresh for the selected treatment, and
                // its seed inputs are immediately reported if valid.
                view_data.proposal_ui =
                    ProposalUiState::for_treatment_cost(view_data.intake.treatment_cost_cents());
                view_data.workflow.dispatch(WorkflowCommand::Advance);
                sync_proposal(view_data);
                emit_status(state, view_data, internal_tx, "continue to financials");
            }
            Err(error) => emit_status(state, view_data, internal_tx, error.to_string()),
        },
        _ => {}
    }
}

fn handle_proposal_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let pay_in_full = view_data.proposal_ui.inputs.pay_in_full;
    match key.code {
        KeyCode::Char(digit @ '1'..='3') => {
            if pay_in_full {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    "strategy presets are locked while paying in full",
                );
                return;
            }
            let index = digit as usize - '1' as usize;
            view_data
                .proposal_ui
                .inputs
                .select_preset(PresetKind::ALL[index]);
            sync_proposal(view_data);
        }
        KeyCode::Char('p') => {
            view_data.proposal_ui.inputs.set_pay_in_full(!pay_in_full);
            if view_data.proposal_ui.inputs.pay_in_full {
                view_data.proposal_ui.field = ProposalField::Insurance;
            }
            sync_proposal(view_data);
        }
        KeyCode::Char('v') => {
            view_data.proposal_ui.inputs.toggle_verified();
            sync_proposal(view_data);
        }
        KeyCode::Up if !pay_in_full => {
            view_data.proposal_ui.field =
                move_cursor(&ProposalField::ALL, view_data.proposal_ui.field, -1);
        }
        KeyCode::Down if !pay_in_full => {
            view_data.proposal_ui.field =
                move_cursor(&ProposalField::ALL, view_data.proposal_ui.field, 1);
        }
        KeyCode::Left | KeyCode::Right => {
            let delta: i64 = if key.code == KeyCode::Left { -1 } else { 1 };
            adjust_proposal_field(view_data, delta);
            sync_proposal(view_data);
        }
        KeyCode::Enter => {
            let events = view_data.workflow.dispatch(WorkflowCommand::Advance);
            if events
                .iter()
                .any(|event| matches!(event, coco_app::WorkflowEvent::AdvanceBlocked(_)))
            {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    "complete a valid proposal to continue",
                );
            }
        }
        KeyCode::Esc | KeyCode::Backspace => {
            view_data.workflow.dispatch(WorkflowCommand::Back);
        }
        _ => {}
    }
}

fn adjust_proposal_field(view_data: &mut ViewData, delta: i64) {
    let inputs = &mut view_data.proposal_ui.inputs;
    let field = if inputs.pay_in_full {
        // Only the insurance estimate stays adjustable in pay-in-full mode.
        ProposalField::Insurance
    } else {
        view_data.proposal_ui.field
    };
    match field {
        ProposalField::DownPayment => {
            inputs.set_down_payment(
                inputs.down_payment_cents + delta * coco_app::DOWN_PAYMENT_STEP_CENTS,
            );
        }
        ProposalField::TermMonths => {
            inputs.set_term_months(inputs.term_months + delta as i32);
        }
        ProposalField::Insurance => {
            inputs.set_insurance(inputs.insurance_cents + delta * coco_app::INSURANCE_STEP_CENTS);
        }
    }
}

/// The upward notification: record the derived proposal on the workflow
/// whenever the inputs evaluate valid. Invalid states never notify; a
/// previously recorded proposal stays put.
fn sync_proposal(view_data: &mut ViewData) {
    if let Some(proposal) = view_data.proposal_ui.inputs.proposal() {
        view_data
            .workflow
            .dispatch(WorkflowCommand::RecordProposal(proposal));
    }
}

fn handle_contract_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter => {
            view_data.workflow.dispatch(WorkflowCommand::Advance);
            emit_status(
                state,
                view_data,
                internal_tx,
                "contract signed via e-sign (mock)",
            );
        }
        KeyCode::Esc | KeyCode::Backspace => {
            view_data.workflow.dispatch(WorkflowCommand::Back);
        }
        _ => {}
    }
}

fn handle_payment_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Left | KeyCode::Right => {
            view_data.payment_method = match view_data.payment_method {
                PaymentMethod::CreditCard => PaymentMethod::BankTransfer,
                PaymentMethod::BankTransfer => PaymentMethod::CreditCard,
            };
        }
        KeyCode::Enter => {
            let label = view_data.payment_method.label();
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("payment processed via {label} (mock)"),
            );
        }
        KeyCode::Esc | KeyCode::Backspace => {
            view_data.workflow.dispatch(WorkflowCommand::Back);
        }
        _ => {}
    }
}

fn move_cursor<T: Copy + PartialEq>(items: &[T], current: T, delta: isize) -> T {
    let position = items
        .iter()
        .position(|item| *item == current)
        .unwrap_or(0) as isize;
    let len = items.len() as isize;
    let next = (position + delta).rem_euclid(len) as usize;
    items[next]
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = ViewKind::ALL
        .iter()
        .position(|view| *view == state.view)
        .unwrap_or(0);
    let view_titles = ViewKind::ALL
        .iter()
        .map(|view| view.label().to_owned())
        .collect::<Vec<String>>();
    let tabs = Tabs::new(view_titles)
        .block(Block::default().title("coco").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    let (title, body) = match state.view {
        ViewKind::Dashboard => ("dashboard", render_dashboard_text(view_data)),
        ViewKind::CaseWorkflow => ("case workflow", render_workflow_text(view_data)),
        ViewKind::Team | ViewKind::Settings => (state.view.label(), placeholder_text()),
    };
    let body_widget = Paragraph::new(body).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(body_widget, layout[1]);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if state.menu == MenuVisibility::Visible {
        let area = centered_rect(40, 40, frame.area());
        frame.render_widget(Clear, area);
        let menu = Paragraph::new(render_menu_overlay_text(state))
            .block(Block::default().title("navigate").borders(Borders::ALL));
        frame.render_widget(menu, area);
    }

    if state.coach == CoachVisibility::Visible {
        let area = centered_rect(70, 52, frame.area());
        frame.render_widget(Clear, area);
        let coach = Paragraph::new(render_coach_overlay_text(&view_data.coach)).block(
            Block::default()
                .title("coco assistant")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(coach, area);
    }

    if view_data.help_visible {
        let area = centered_rect(80, 64, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn render_dashboard_text(view_data: &ViewData) -> String {
    let kpis = &view_data.dashboard.kpis;
    let mut lines = vec![
        format!(
            "cash collected (mtd): {}  {}{}% vs last month",
            format_money(kpis.cash_collected_mtd_cents),
            if kpis.cash_delta_percent >= 0 { "+" } else { "" },
            kpis.cash_delta_percent
        ),
        format!(
            "time to signature: {}h  ({}{}h vs avg)",
            kpis.time_to_signature_hours,
            if kpis.time_to_signature_delta_hours >= 0 {
                "+"
            } else {
                ""
            },
            kpis.time_to_signature_delta_hours
        ),
        format!(
            "conversion rate: {}% (target {}%)",
            kpis.conversion_rate_percent, kpis.conversion_target_percent
        ),
        format!(
            "recall queue: {} ({} overdue)",
            kpis.recall_queue_size, kpis.recall_overdue
        ),
        String::new(),
        "revenue & starts (this week)".to_owned(),
    ];

    let max_revenue = view_data
        .dashboard
        .revenue
        .iter()
        .map(|point| point.revenue_cents)
        .max()
        .unwrap_or(0);
    for point in &view_data.dashboard.revenue {
        lines.push(format!(
            "  {}  {:>7}  {}  {} starts",
            weekday_label(point.day),
            format_money(point.revenue_cents),
            revenue_bar(point.revenue_cents, max_revenue),
            point.starts
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "active negotiations ({})",
        view_data.dashboard.negotiations.len()
    ));
    for case in &view_data.dashboard.negotiations {
        let probability = case
            .probability
            .map(|p| format!("{} prob", p.as_str()))
            .unwrap_or_default();
        lines.push(format!(
            "  {}  {}  {}  {}  {}",
            case.patient_name,
            case.status.as_str(),
            probability,
            format_relative(view_data.now, case.last_touched),
            format_money(case.total_value_cents)
        ));
    }

    lines.push(String::new());
    lines.push(format!("recall queue ({})", view_data.dashboard.recall.len()));
    for case in &view_data.dashboard.recall {
        let due = case
            .recall_date
            .map(|date| recall_due_label(date, view_data.now.date()))
            .unwrap_or_default();
        let reason = case.observation_reason.clone().unwrap_or_default();
        lines.push(format!("  {}  {}  reason: {}", case.patient_name, due, reason));
    }

    lines.join("\n")
}

fn render_workflow_text(view_data: &ViewData) -> String {
    let mut sections = vec![stepper_line(view_data.workflow.step)];

    let body = match view_data.workflow.step {
        WorkflowStep::Intake => render_intake_text(view_data),
        WorkflowStep::Proposal => render_proposal_text(&view_data.proposal_ui),
        WorkflowStep::Contract => render_contract_text(view_data),
        WorkflowStep::Payment => render_payment_text(view_data),
    };
    sections.push(body);

    if let Some(patient) = &view_data.patient {
        let verified = view_data
            .workflow
            .proposal
            .map(|proposal| proposal.insurance_verified)
            .unwrap_or(false);
        sections.push(format!(
            "patient: {} | {} | insurance {}",
            patient.name,
            patient.insurance_carrier,
            if verified { "verified" } else { "pending" }
        ));
    }

    sections.join("\n\n")
}

fn stepper_line(current: WorkflowStep) -> String {
    WorkflowStep::ALL
        .iter()
        .map(|step| {
            let mark = if step.index() < current.index() {
                STEP_DONE_MARK
            } else if *step == current {
                STEP_CURRENT_MARK
            } else {
                STEP_PENDING_MARK
            };
            format!("{mark} {}", step.label())
        })
        .collect::<Vec<String>>()
        .join("   ")
}

fn render_intake_text(view_data: &ViewData) -> String {
    let cursor = |field: IntakeField| {
        if view_data.intake_field == field {
            FIELD_CURSOR
        } else {
            " "
        }
    };
    [
        "patient intake".to_owned(),
        format!(
            "{} {}: {}",
            cursor(IntakeField::FirstName),
            IntakeField::FirstName.label(),
            view_data.intake.first_name
        ),
        format!(
            "{} {}: {}",
            cursor(IntakeField::LastName),
            IntakeField::LastName.label(),
            view_data.intake.last_name
        ),
        format!(
            "{} {}: {} - {}",
            cursor(IntakeField::Treatment),
            IntakeField::Treatment.label(),
            view_data.intake.treatment.label(),
            format_money(view_data.intake.treatment_cost_cents())
        ),
    ]
    .join("\n")
}

fn render_proposal_text(proposal_ui: &ProposalUiState) -> String {
    let inputs = &proposal_ui.inputs;
    let evaluation = inputs.evaluate();
    let mut lines = vec![strategy_line(inputs), mode_line(inputs.pay_in_full)];

    lines.push(format!(
        "standard fee: {}",
        format_money(inputs.treatment_cost_cents)
    ));
    if inputs.pay_in_full {
        lines.push(format!(
            "5% courtesy applied: -{}",
            format_money(evaluation.discount_cents)
        ));
    }

    lines.push(insurance_line(proposal_ui));
    if !inputs.pay_in_full {
        lines.push(down_payment_line(proposal_ui, &evaluation));
        lines.push(term_line(proposal_ui, &evaluation));
    }

    lines.push(String::new());
    lines.push(results_line(inputs, &evaluation));
    lines.join("\n")
}

fn strategy_line(inputs: &ProposalInputs) -> String {
    let entries = PresetKind::ALL
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let marker = if *kind == inputs.preset { "*" } else { " " };
            format!(
                "[{}]{} {} {}% down",
                index + 1,
                marker,
                kind.label(),
                kind.preset().min_down_percent
            )
        })
        .collect::<Vec<String>>()
        .join("  ");
    if inputs.pay_in_full {
        format!("strategy (locked): {entries}")
    } else {
        format!("strategy: {entries}")
    }
}

fn mode_line(pay_in_full: bool) -> String {
    if pay_in_full {
        "mode: pay in full (save 5%)".to_owned()
    } else {
        "mode: monthly plan".to_owned()
    }
}

fn insurance_line(proposal_ui: &ProposalUiState) -> String {
    let inputs = &proposal_ui.inputs;
    let cursor = if proposal_ui.field == ProposalField::Insurance || inputs.pay_in_full {
        FIELD_CURSOR
    } else {
        " "
    };
    format!(
        "{} {}: {} [{}]",
        cursor,
        ProposalField::Insurance.label(),
        format_money(inputs.insurance_cents),
        if inputs.insurance_verified {
            "verified"
        } else {
            "pending verification"
        }
    )
}

fn down_payment_line(proposal_ui: &ProposalUiState, evaluation: &Evaluation) -> String {
    let inputs = &proposal_ui.inputs;
    let cursor = if proposal_ui.field == ProposalField::DownPayment {
        FIELD_CURSOR
    } else {
        " "
    };
    let mut line = format!(
        "{} {}: {}",
        cursor,
        ProposalField::DownPayment.label(),
        format_money(inputs.down_payment_cents)
    );
    if !evaluation.down_ok {
        line.push_str(&format!(
            "  (minimum {} required for {} plan)",
            format_money(evaluation.min_down_cents),
            inputs.preset.label()
        ));
    }
    line
}

fn term_line(proposal_ui: &ProposalUiState, evaluation: &Evaluation) -> String {
    let inputs = &proposal_ui.inputs;
    let cursor = if proposal_ui.field == ProposalField::TermMonths {
        FIELD_CURSOR
    } else {
        " "
    };
    let mut line = format!(
        "{} {}: {} months",
        cursor,
        ProposalField::TermMonths.label(),
        inputs.term_months
    );
    if !evaluation.term_ok {
        line.push_str(&format!(
            "  (maximum {} months allowed for {} plan)",
            inputs.preset.preset().max_term_months,
            inputs.preset.label()
        ));
    }
    line
}

fn results_line(inputs: &ProposalInputs, evaluation: &Evaluation) -> String {
    if inputs.pay_in_full {
        return format!(
            "total due today: {}  (savings applied, full payment)",
            format_money(evaluation.due_today_cents)
        );
    }
    let verdict = if evaluation.is_valid() {
        "DCE approved"
    } else {
        "invalid terms"
    };
    format!(
        "monthly payment: {}/mo  due today: {}  [{}]",
        format_money_rounded(evaluation.monthly_payment_cents),
        format_money(evaluation.due_today_cents),
        verdict
    )
}

fn render_contract_text(view_data: &ViewData) -> String {
    let Some(proposal) = view_data.workflow.proposal else {
        return "no proposal recorded".to_owned();
    };

    let mut lines = vec![
        "terms validated & approved".to_owned(),
        "contract #CO-29384 generated securely (draft preview)".to_owned(),
        format!(
            "total treatment: {}",
            format_money(proposal.treatment_cost_cents)
        ),
        format!(
            "insurance (est.): -{}",
            format_money(proposal.insurance_estimate_cents)
        ),
    ];
    if proposal.pay_in_full {
        lines.push(format!(
            "pay-in-full discount: -{}",
            format_money(proposal.discount_cents)
        ));
    }
    lines.push(format!(
        "due today: {}",
        format_money(proposal.down_payment_cents)
    ));
    if !proposal.pay_in_full {
        lines.push(format!(
            "monthly: {} months @ {}",
            proposal.term_months,
            format_money_rounded(proposal.monthly_payment_cents())
        ));
    }
    lines.join("\n")
}

fn render_payment_text(view_data: &ViewData) -> String {
    let due = view_data
        .workflow
        .proposal
        .map(|proposal| proposal.down_payment_cents)
        .unwrap_or(0);
    let methods = PaymentMethod::ALL
        .iter()
        .map(|method| {
            let marker = if *method == view_data.payment_method {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{marker} {} ({})", method.label(), method.detail())
        })
        .collect::<Vec<String>>()
        .join("  ");
    [
        "secure payment processing".to_owned(),
        format!("total due now: {}", format_money(due)),
        methods,
    ]
    .join("\n")
}

fn placeholder_text() -> String {
    "work in progress\nthis module is part of phase 2".to_owned()
}

fn render_menu_overlay_text(state: &AppState) -> String {
    let mut lines = Vec::new();
    for (index, view) in ViewKind::ALL.iter().enumerate() {
        let marker = if *view == state.view { "*" } else { " " };
        lines.push(format!("{} {}. {}", marker, index + 1, view.label()));
    }
    lines.push(String::new());
    lines.push("1-4 navigate, esc close".to_owned());
    lines.join("\n")
}

fn render_coach_overlay_text(coach: &CoachUiState) -> String {
    let mut lines = vec![
        "I'm listening. what objection is the patient raising?".to_owned(),
        String::new(),
    ];
    for (index, objection) in ObjectionKind::ALL.iter().enumerate() {
        let marker = if coach.selected == Some(*objection) {
            "*"
        } else {
            " "
        };
        lines.push(format!("{} {}. {}", marker, index + 1, objection.label()));
    }
    if let Some(objection) = coach.selected {
        lines.push(String::new());
        lines.push("suggested response:".to_owned());
        lines.push(format!("\"{}\"", objection.script()));
        lines.push(String::new());
        lines.push("customize this to your natural voice".to_owned());
    }
    lines.push(String::new());
    lines.push("1-4 pick an objection, esc close".to_owned());
    lines.join("\n")
}

fn help_overlay_text() -> String {
    [
        "global",
        "  tab / shift-tab   cycle views",
        "  m                 navigation menu",
        "  n                 start a new case",
        "  @                 objection coach",
        "  r                 refresh dashboard data",
        "  ctrl-q            quit",
        "",
        "case workflow",
        "  enter             advance a step",
        "  esc / backspace   previous step",
        "  up / down         move between fields",
        "  left / right      adjust the active field",
        "  1 / 2 / 3         financing strategy preset",
        "  p                 toggle pay in full",
        "  v                 toggle insurance verification",
    ]
    .join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    match state.view {
        ViewKind::Dashboard => "tab: views  n: new case  @: coach  ?: help".to_owned(),
        ViewKind::CaseWorkflow => match view_data.workflow.step {
            WorkflowStep::Intake => "enter: continue to financials".to_owned(),
            WorkflowStep::Proposal => "enter: review & sign  p: pay in full  v: verify".to_owned(),
            WorkflowStep::Contract => "enter: sign via e-sign (mock)".to_owned(),
            WorkflowStep::Payment => "enter: process payment (mock)".to_owned(),
        },
        ViewKind::Team | ViewKind::Settings => "tab: views  ?: help".to_owned(),
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "mon",
        Weekday::Tuesday => "tue",
        Weekday::Wednesday => "wed",
        Weekday::Thursday => "thu",
        Weekday::Friday => "fri",
        Weekday::Saturday => "sat",
        Weekday::Sunday => "sun",
    }
}

fn revenue_bar(revenue_cents: i64, max_revenue_cents: i64) -> String {
    if max_revenue_cents <= 0 {
        return String::new();
    }
    let width = (revenue_cents * REVENUE_BAR_WIDTH + max_revenue_cents / 2) / max_revenue_cents;
    REVENUE_BAR.repeat(width.max(0) as usize)
}

/// Currency display: whole dollars with thousands separators, cents only
/// when present.
fn format_money(cents: i64) -> String {
    let negative = cents < 0;
    let cents = cents.abs();
    let dollars = cents / 100;
    let remainder = cents % 100;
    let mut formatted = group_thousands(dollars);
    if remainder != 0 {
        formatted.push_str(&format!(".{remainder:02}"));
    }
    if negative {
        format!("-${formatted}")
    } else {
        format!("${formatted}")
    }
}

/// Currency display rounded to the nearest dollar, for per-month figures.
fn format_money_rounded(cents: i64) -> String {
    format_money((cents + 50) / 100 * 100)
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_relative(now: OffsetDateTime, then: OffsetDateTime) -> String {
    let elapsed = now - then;
    let minutes = elapsed.whole_minutes();
    if minutes < 1 {
        return "just now".to_owned();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.whole_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", elapsed.whole_days())
}

fn recall_due_label(recall: Date, today: Date) -> String {
    if recall == today {
        "due today".to_owned()
    } else if recall < today {
        "overdue".to_owned()
    } else {
        format!("due {recall}")
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, IntakeField, ProposalField, ViewData, format_money, format_money_rounded,
        format_relative, handle_key_event, recall_due_label, refresh_view_data,
        render_coach_overlay_text, render_contract_text, render_dashboard_text,
        render_proposal_text, render_workflow_text, revenue_bar, status_text, stepper_line,
        weekday_label,
    };
    use coco_app::{
        AppState, CoachVisibility, MenuVisibility, ObjectionKind, PaymentMethod, PresetKind,
        ViewKind, WorkflowStep,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc;
    use time::{Duration, Weekday};

    #[derive(Debug, Default)]
    struct TestRuntime {
        load_count: usize,
    }

    impl AppRuntime for TestRuntime {
        fn load_kpi_summary(&mut self) -> anyhow::Result<coco_app::KpiSummary> {
            self.load_count += 1;
            Ok(coco_testkit::demo_kpi_summary())
        }

        fn load_revenue_week(&mut self) -> anyhow::Result<Vec<coco_app::RevenuePoint>> {
            Ok(coco_testkit::demo_revenue_week())
        }

        fn load_active_negotiations(&mut self) -> anyhow::Result<Vec<coco_app::Case>> {
            Ok(coco_testkit::demo_active_negotiations())
        }

        fn load_recall_queue(&mut self) -> anyhow::Result<Vec<coco_app::Case>> {
            Ok(coco_testkit::demo_recall_queue())
        }

        fn load_workflow_patient(&mut self) -> anyhow::Result<coco_app::Patient> {
            Ok(coco_testkit::demo_patient())
        }
    }

    fn internal_tx() -> mpsc::Sender<super::InternalEvent> {
        let (tx, _rx) = mpsc::channel();
        tx
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_view_data() -> ViewData {
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        refresh_view_data(&mut runtime, &mut view_data).expect("demo data loads");
        view_data.now = coco_testkit::demo_now();
        view_data
    }

    fn press(state: &mut AppState, view_data: &mut ViewData, codes: &[KeyCode]) {
        let mut runtime = TestRuntime::default();
        let tx = internal_tx();
        for code in codes {
            let _ = handle_key_event(state, &mut runtime, view_data, &tx, key(*code));
        }
    }

    fn state_on_proposal_step(view_data: &mut ViewData) -> AppState {
        let mut state = AppState {
            view: ViewKind::CaseWorkflow,
            ..AppState::default()
        };
        press(&mut state, view_data, &[KeyCode::Enter]);
        assert_eq!(view_data.workflow.step, WorkflowStep::Proposal);
        state
    }

    #[test]
    fn ctrl_q_quits() {
        let mut state = AppState::default();
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        let tx = internal_tx();

        let should_quit = handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(should_quit);
    }

    #[test]
    fn tab_cycles_views() {
        let mut state = AppState::default();
        let mut view_data = loaded_view_data();

        press(&mut state, &mut view_data, &[KeyCode::Tab]);
        assert_eq!(state.view, ViewKind::CaseWorkflow);

        press(&mut state, &mut view_data, &[KeyCode::BackTab]);
        assert_eq!(state.view, ViewKind::Dashboard);
    }

    #[test]
    fn at_key_opens_coach_and_esc_closes_it() {
        let mut state = AppState::default();
        let mut view_data = loaded_view_data();

        press(&mut state, &mut view_data, &[KeyCode::Char('@')]);
        assert_eq!(state.coach, CoachVisibility::Visible);

        press(&mut state, &mut view_data, &[KeyCode::Char('2')]);
        assert_eq!(view_data.coach.selected, Some(ObjectionKind::Spouse));

        press(&mut state, &mut view_data, &[KeyCode::Esc]);
        assert_eq!(state.coach, CoachVisibility::Hidden);
        assert_eq!(view_data.coach.selected, None);
    }

    #[test]
    fn menu_digit_navigates_and_closes_the_menu() {
        let mut state = AppState::default();
        let mut view_data = loaded_view_data();

        press(&mut state, &mut view_data, &[KeyCode::Char('m')]);
        assert_eq!(state.menu, MenuVisibility::Visible);

        press(&mut state, &mut view_data, &[KeyCode::Char('2')]);
        assert_eq!(state.view, ViewKind::CaseWorkflow);
        assert_eq!(state.menu, MenuVisibility::Hidden);
    }

    #[test]
    fn n_starts_a_fresh_case() {
        let mut state = AppState::default();
        let mut view_data = loaded_view_data();
        view_data.workflow.dispatch(coco_app::WorkflowCommand::Advance);

        press(&mut state, &mut view_data, &[KeyCode::Char('n')]);
        assert_eq!(state.view, ViewKind::CaseWorkflow);
        assert_eq!(view_data.workflow.step, WorkflowStep::Intake);
        assert_eq!(view_data.workflow.proposal, None);
        assert_eq!(view_data.intake.first_name, "");
    }

    #[test]
    fn refresh_prefills_intake_from_the_patient() {
        let view_data = loaded_view_data();
        assert_eq!(view_data.intake.first_name, "Sarah");
        assert_eq!(view_data.intake.last_name, "Mitchell");
        assert_eq!(view_data.intake.treatment_cost_cents(), 550_000);
    }

    #[test]
    fn r_key_reloads_dashboard_data() {
        let mut state = AppState::default();
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        let tx = internal_tx();

        handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            key(KeyCode::Char('r')),
        );
        assert_eq!(runtime.load_count, 1);
        assert_eq!(state.status_line.as_deref(), Some("dashboard refreshed"));
    }

    #[test]
    fn intake_enter_advances_and_records_the_seed_proposal() {
        let mut view_data = loaded_view_data();
        let _state = state_on_proposal_step(&mut view_data);

        // The balanced seed for a $5,500 treatment is immediately valid, so
        // the gate opens on entry.
        let proposal = view_data.workflow.proposal.expect("seed proposal recorded");
        assert_eq!(proposal.down_payment_cents, 110_000);
        assert_eq!(proposal.term_months, 18);
        assert_eq!(view_data.proposal_ui.inputs.treatment_cost_cents, 550_000);
    }

    #[test]
    fn intake_with_blank_name_stays_put() {
        let mut view_data = loaded_view_data();
        view_data.intake.first_name.clear();
        let mut state = AppState {
            view: ViewKind::CaseWorkflow,
            ..AppState::default()
        };

        press(&mut state, &mut view_data, &[KeyCode::Enter]);
        assert_eq!(view_data.workflow.step, WorkflowStep::Intake);
        assert!(
            state
                .status_line
                .as_deref()
                .is_some_and(|status| status.contains("first name"))
        );
    }

    #[test]
    fn intake_edits_name_and_treatment_fields() {
        let mut view_data = loaded_view_data();
        let mut state = AppState {
            view: ViewKind::CaseWorkflow,
            ..AppState::default()
        };

        press(&mut state, &mut view_data, &[KeyCode::Backspace]);
        assert_eq!(view_data.intake.first_name, "Sara");
        press(&mut state, &mut view_data, &[KeyCode::Char('h')]);
        assert_eq!(view_data.intake.first_name, "Sarah");

        press(
            &mut state,
            &mut view_data,
            &[KeyCode::Down, KeyCode::Down, KeyCode::Right],
        );
        assert_eq!(view_data.intake_field, IntakeField::Treatment);
        assert_eq!(view_data.intake.treatment_cost_cents(), 480_000);
    }

    #[test]
    fn preset_keys_reset_the_sliders() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);

        press(&mut state, &mut view_data, &[KeyCode::Char('3')]);
        let inputs = &view_data.proposal_ui.inputs;
        assert_eq!(inputs.preset, PresetKind::Aggressive);
        assert_eq!(inputs.down_payment_cents, 55_000);
        assert_eq!(inputs.term_months, 24);

        // The aggressive seed re-notified the workflow.
        let proposal = view_data.workflow.proposal.expect("proposal re-recorded");
        assert_eq!(proposal.down_payment_cents, 55_000);
        assert_eq!(proposal.term_months, 24);
    }

    #[test]
    fn invalid_inputs_do_not_overwrite_the_recorded_proposal() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);

        // Drag the down payment below the balanced floor.
        press(&mut state, &mut view_data, &[KeyCode::Left, KeyCode::Left]);
        let inputs = &view_data.proposal_ui.inputs;
        assert_eq!(inputs.down_payment_cents, 90_000);
        assert!(!inputs.evaluate().is_valid());

        let recorded = view_data.workflow.proposal.expect("seed proposal persists");
        assert_eq!(recorded.down_payment_cents, 110_000);

        // Raising it back above the floor re-notifies with the new figure.
        press(
            &mut state,
            &mut view_data,
            &[KeyCode::Right, KeyCode::Right, KeyCode::Right],
        );
        let recorded = view_data.workflow.proposal.expect("proposal re-recorded");
        assert_eq!(recorded.down_payment_cents, 120_000);
    }

    #[test]
    fn pay_in_full_records_the_discounted_proposal() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);

        press(&mut state, &mut view_data, &[KeyCode::Char('p')]);
        let proposal = view_data.workflow.proposal.expect("pay in full is valid");
        assert!(proposal.pay_in_full);
        assert_eq!(proposal.treatment_cost_cents, 522_500);
        assert_eq!(proposal.down_payment_cents, 522_500);
        assert_eq!(proposal.term_months, 0);
        assert_eq!(proposal.discount_cents, 27_500);

        // Presets are locked while paying in full.
        press(&mut state, &mut view_data, &[KeyCode::Char('1')]);
        assert_eq!(view_data.proposal_ui.inputs.preset, PresetKind::Balanced);
        assert_eq!(view_data.proposal_ui.field, ProposalField::Insurance);
    }

    #[test]
    fn insurance_adjustment_resets_verification() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);

        press(&mut state, &mut view_data, &[KeyCode::Char('v')]);
        assert!(view_data.proposal_ui.inputs.insurance_verified);

        press(
            &mut state,
            &mut view_data,
            &[KeyCode::Down, KeyCode::Down, KeyCode::Right],
        );
        let inputs = &view_data.proposal_ui.inputs;
        assert_eq!(inputs.insurance_cents, 10_000);
        assert!(!inputs.insurance_verified);

        let proposal = view_data.workflow.proposal.expect("proposal re-recorded");
        assert_eq!(proposal.insurance_estimate_cents, 10_000);
        assert!(!proposal.insurance_verified);
    }

    #[test]
    fn full_workflow_reaches_payment() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);

        press(&mut state, &mut view_data, &[KeyCode::Enter]);
        assert_eq!(view_data.workflow.step, WorkflowStep::Contract);

        press(&mut state, &mut view_data, &[KeyCode::Enter]);
        assert_eq!(view_data.workflow.step, WorkflowStep::Payment);

        press(&mut state, &mut view_data, &[KeyCode::Right]);
        assert_eq!(view_data.payment_method, PaymentMethod::BankTransfer);

        press(&mut state, &mut view_data, &[KeyCode::Enter]);
        assert!(
            state
                .status_line
                .as_deref()
                .is_some_and(|status| status.contains("bank transfer"))
        );
    }

    #[test]
    fn backspace_walks_the_stepper_backwards() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);

        press(&mut state, &mut view_data, &[KeyCode::Enter, KeyCode::Esc]);
        assert_eq!(view_data.workflow.step, WorkflowStep::Proposal);
    }

    #[test]
    fn dashboard_text_lists_kpis_and_caseload() {
        let view_data = loaded_view_data();
        let text = render_dashboard_text(&view_data);

        assert!(text.contains("cash collected (mtd): $142,500  +12% vs last month"));
        assert!(text.contains("conversion rate: 68% (target 70%)"));
        assert!(text.contains("Sarah Mitchell  proposal  high prob  10m ago  $5,500"));
        assert!(text.contains("John Desmond  discovery  medium prob  1h ago  $6,200"));
        assert!(text.contains("Emma Kline  due today  reason: Spouse Consult"));
        assert!(text.contains("Mike Ross  overdue  reason: Insurance Waiting"));
    }

    #[test]
    fn proposal_text_reports_dce_verdict() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);

        let text = render_proposal_text(&view_data.proposal_ui);
        assert!(text.contains("standard fee: $5,500"));
        assert!(text.contains("monthly payment: $244/mo  due today: $1,100  [DCE approved]"));

        press(&mut state, &mut view_data, &[KeyCode::Left, KeyCode::Left]);
        let text = render_proposal_text(&view_data.proposal_ui);
        assert!(text.contains("[invalid terms]"));
        assert!(text.contains("minimum $1,100 required for Balanced plan"));
    }

    #[test]
    fn pay_in_full_text_shows_the_courtesy_discount() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);
        press(&mut state, &mut view_data, &[KeyCode::Char('p')]);

        let text = render_proposal_text(&view_data.proposal_ui);
        assert!(text.contains("mode: pay in full (save 5%)"));
        assert!(text.contains("5% courtesy applied: -$275"));
        assert!(text.contains("total due today: $5,225"));
    }

    #[test]
    fn contract_text_summarizes_the_recorded_proposal() {
        let mut view_data = loaded_view_data();
        let mut state = state_on_proposal_step(&mut view_data);
        press(&mut state, &mut view_data, &[KeyCode::Enter]);

        let text = render_contract_text(&view_data);
        assert!(text.contains("total treatment: $5,500"));
        assert!(text.contains("due today: $1,100"));
        assert!(text.contains("monthly: 18 months @ $244"));
    }

    #[test]
    fn workflow_text_carries_the_stepper_and_patient_line() {
        let view_data = loaded_view_data();
        let text = render_workflow_text(&view_data);
        assert!(text.starts_with("[>] intake   [ ] proposal   [ ] contract   [ ] payment"));
        assert!(text.contains("patient: Sarah Mitchell | Delta Dental PPO | insurance pending"));
    }

    #[test]
    fn stepper_marks_done_current_and_pending() {
        assert_eq!(
            stepper_line(WorkflowStep::Contract),
            "[x] intake   [x] proposal   [>] contract   [ ] payment"
        );
    }

    #[test]
    fn coach_overlay_lists_objections_and_selected_script() {
        let mut coach = super::CoachUiState::default();
        let text = render_coach_overlay_text(&coach);
        assert!(text.contains("1. price"));
        assert!(text.contains("4. competitor"));
        assert!(!text.contains("suggested response"));

        coach.selected = Some(ObjectionKind::Timing);
        let text = render_coach_overlay_text(&coach);
        assert!(text.contains("suggested response:"));
        assert!(text.contains("lock in your treatment plan validity for 30"));
    }

    #[test]
    fn status_text_prefers_the_status_line_over_hints() {
        let view_data = loaded_view_data();
        let mut state = AppState::default();
        assert_eq!(
            status_text(&state, &view_data),
            "tab: views  n: new case  @: coach  ?: help"
        );

        state.dispatch(coco_app::AppCommand::SetStatus("saved".to_owned()));
        assert_eq!(status_text(&state, &view_data), "saved");
    }

    #[test]
    fn money_formatter_groups_thousands_and_keeps_cents() {
        assert_eq!(format_money(550_000), "$5,500");
        assert_eq!(format_money(14_250_000), "$142,500");
        assert_eq!(format_money(24_444), "$244.44");
        assert_eq!(format_money(-27_500), "-$275");
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money_rounded(24_444), "$244");
        assert_eq!(format_money_rounded(20_625), "$206");
    }

    #[test]
    fn relative_formatter_scales_with_elapsed_time() {
        let now = coco_testkit::demo_now();
        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(now, now - Duration::minutes(10)), "10m ago");
        assert_eq!(format_relative(now, now - Duration::hours(1)), "1h ago");
        assert_eq!(format_relative(now, now - Duration::days(30)), "30d ago");
    }

    #[test]
    fn recall_labels_compare_against_today() {
        let today = coco_testkit::demo_now().date();
        assert_eq!(recall_due_label(today, today), "due today");
        assert_eq!(recall_due_label(coco_testkit::overdue_recall_date(), today), "overdue");
        assert_eq!(
            recall_due_label(today + Duration::days(7), today),
            "due 2026-02-20"
        );
    }

    #[test]
    fn revenue_bars_scale_against_the_weekly_peak() {
        assert_eq!(revenue_bar(920_000, 920_000).len(), 16);
        assert_eq!(revenue_bar(420_000, 920_000), "#######");
        assert_eq!(revenue_bar(0, 920_000), "");
        assert_eq!(revenue_bar(100, 0), "");
        assert_eq!(weekday_label(Weekday::Thursday), "thu");
    }
}
