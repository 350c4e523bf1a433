#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use rfd::FileDialog;
use std::{fs, path::Path, path::PathBuf};
use tracing::{error, info, warn};
use unit_converter_toolbox::{
    config, conversion,
    currency::{self, CurrencyCode, CurrencyError, HttpRateProvider, RateProvider},
    logging,
    qr::{PngQrEncoder, QrEncoder},
    quantity::{ConversionRequest, Unit, UnitCategory},
};

#[derive(Debug, Parser)]
#[command(name = "unit_converter_toolbox", version)]
struct GuiArgs {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<(), eframe::Error> {
    logging::init();
    let args = GuiArgs::parse();
    let app_cfg = match config::load_from(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config load failed, using defaults");
            config::Config::default()
        }
    };
    let rates: Box<dyn RateProvider> = match HttpRateProvider::new(&app_cfg.currency) {
        Ok(p) => Box::new(p),
        Err(e) => {
            error!(error = %e, "rate client init failed");
            Box::new(UnavailableRates(e.to_string()))
        }
    };
    let qr: Box<dyn QrEncoder> = Box::new(PngQrEncoder::new(&app_cfg.qr));

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(900.0, 620.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Unit Converter Toolbox",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, rates, qr))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let rgba = image::load_from_memory(&bytes).ok()?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// 클라이언트 생성에 실패했을 때 환율 화면에 원인을 보여주기 위한 대체 구현.
struct UnavailableRates(String);

impl RateProvider for UnavailableRates {
    fn get_rate(&self, _from: CurrencyCode, _to: CurrencyCode) -> Result<f64, CurrencyError> {
        Err(CurrencyError::ServiceUnavailable(self.0.clone()))
    }
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 성공/실패 메시지를 색을 달리해 표시한다.
fn outcome_label(ui: &mut egui::Ui, outcome: &Option<Outcome>) {
    match outcome {
        Some(Outcome::Ok(msg)) => {
            ui.colored_label(egui::Color32::from_rgb(60, 170, 90), msg);
        }
        Some(Outcome::Err(msg)) => {
            ui.colored_label(egui::Color32::from_rgb(220, 80, 70), msg);
        }
        None => {}
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Ok(String),
    Err(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Length,
    Weight,
    Temperature,
    Currency,
    QrCode,
}

/// 길이/무게/온도 화면 하나의 입력 상태.
#[derive(Debug, Clone)]
struct UnitPanel {
    category: UnitCategory,
    value: f64,
    from: Unit,
    to: Unit,
    outcome: Option<Outcome>,
}

impl UnitPanel {
    fn new(category: UnitCategory, from: Unit, to: Unit) -> Self {
        Self {
            category,
            value: 0.0,
            from,
            to,
            outcome: None,
        }
    }

    fn run(&mut self) {
        let request = ConversionRequest::new(self.category, self.from, self.to, self.value);
        self.outcome = Some(match conversion::convert_request(&request) {
            Ok(v) => Outcome::Ok(conversion::format_result(
                self.value,
                self.from.name(),
                v,
                self.to.name(),
            )),
            Err(e) => Outcome::Err(format!("오류: {e}")),
        });
    }
}

struct GuiApp {
    tab: Tab,
    rates: Box<dyn RateProvider>,
    qr: Box<dyn QrEncoder>,
    // 단위 변환
    length: UnitPanel,
    weight: UnitPanel,
    temperature: UnitPanel,
    // 환율
    currency_from: CurrencyCode,
    currency_to: CurrencyCode,
    currency_amount: f64,
    currency_outcome: Option<Outcome>,
    // QR
    qr_text: String,
    qr_png: Option<Vec<u8>>,
    qr_texture: Option<egui::TextureHandle>,
    qr_texture_dirty: bool,
    qr_outcome: Option<Outcome>,
}

impl GuiApp {
    fn new(
        config: config::Config,
        rates: Box<dyn RateProvider>,
        qr: Box<dyn QrEncoder>,
    ) -> Self {
        let d = &config.default_units;
        Self {
            tab: Tab::Length,
            rates,
            qr,
            length: UnitPanel::new(
                UnitCategory::Length,
                Unit::Length(d.length_from),
                Unit::Length(d.length_to),
            ),
            weight: UnitPanel::new(
                UnitCategory::Weight,
                Unit::Weight(d.weight_from),
                Unit::Weight(d.weight_to),
            ),
            temperature: UnitPanel::new(
                UnitCategory::Temperature,
                Unit::Temperature(d.temperature_from),
                Unit::Temperature(d.temperature_to),
            ),
            currency_from: d.currency_from,
            currency_to: d.currency_to,
            currency_amount: 0.0,
            currency_outcome: None,
            qr_text: String::new(),
            qr_png: None,
            qr_texture: None,
            qr_texture_dirty: false,
            qr_outcome: None,
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("변환 종류");
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Length, "📏 Length"),
            (Tab::Weight, "⚖ Weight"),
            (Tab::Temperature, "🌡 Temperature"),
            (Tab::Currency, "💰 Currency Exchange"),
            (Tab::QrCode, "📱 Generate QR Code"),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).on_hover_text("메뉴 전환").clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_unit_panel(ui: &mut egui::Ui, panel: &mut UnitPanel) {
        heading_with_tip(
            ui,
            &format!("{} Converter", panel.category.name()),
            "값과 단위를 고른 뒤 Convert를 누르세요.",
        );
        ui.add_space(8.0);
        let units = panel.category.units();
        let id = panel.category.name();
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new(format!("{id}_grid"))
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(ui, "Enter value:", "변환할 값");
                    let mut drag = egui::DragValue::new(&mut panel.value)
                        .speed(0.1)
                        .max_decimals(2);
                    // 온도 외에는 음수를 받지 않는다.
                    if panel.category != UnitCategory::Temperature {
                        drag = drag.clamp_range(0.0..=f64::MAX);
                    }
                    ui.add(drag);
                    ui.end_row();

                    label_with_tip(ui, "From:", "현재 값의 단위");
                    egui::ComboBox::from_id_source(format!("{id}_from"))
                        .selected_text(panel.from.name())
                        .show_ui(ui, |ui| {
                            for u in &units {
                                ui.selectable_value(&mut panel.from, *u, u.name());
                            }
                        });
                    ui.end_row();

                    label_with_tip(ui, "To:", "변환할 단위");
                    egui::ComboBox::from_id_source(format!("{id}_to"))
                        .selected_text(panel.to.name())
                        .show_ui(ui, |ui| {
                            for u in &units {
                                ui.selectable_value(&mut panel.to, *u, u.name());
                            }
                        });
                    ui.end_row();
                });
            ui.add_space(8.0);
            if ui.button("Convert").clicked() {
                panel.run();
            }
            outcome_label(ui, &panel.outcome);
        });
    }

    fn run_currency(&mut self) {
        self.currency_outcome = Some(
            match currency::convert_currency(
                self.rates.as_ref(),
                self.currency_amount,
                self.currency_from,
                self.currency_to,
            ) {
                Ok(v) => Outcome::Ok(conversion::format_result(
                    self.currency_amount,
                    self.currency_from.as_str(),
                    v,
                    self.currency_to.as_str(),
                )),
                Err(e) => {
                    warn!(error = %e, "currency conversion failed");
                    Outcome::Err(format!("오류: {e}"))
                }
            },
        );
    }

    fn ui_currency(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(
            ui,
            "Live Currency Converter",
            "환율 서비스에서 현재 환율을 조회합니다. 응답이 올 때까지 화면이 멈춥니다.",
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("currency_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("From Currency:");
                    currency_combo(ui, "currency_from", &mut self.currency_from);
                    ui.end_row();

                    ui.label("To Currency:");
                    currency_combo(ui, "currency_to", &mut self.currency_to);
                    ui.end_row();

                    ui.label("Enter Amount:");
                    ui.add(
                        egui::DragValue::new(&mut self.currency_amount)
                            .speed(1.0)
                            .max_decimals(2)
                            .clamp_range(0.0..=f64::MAX),
                    );
                    ui.end_row();
                });
            ui.add_space(8.0);
            if ui.button("Convert").clicked() {
                self.run_currency();
            }
            outcome_label(ui, &self.currency_outcome);
        });
    }

    fn generate_qr(&mut self) {
        match self.qr.encode_to_image(&self.qr_text) {
            Ok(png) => {
                self.qr_png = Some(png);
                self.qr_texture_dirty = true;
                self.qr_outcome = None;
            }
            Err(e) => {
                self.qr_png = None;
                self.qr_texture = None;
                self.qr_outcome = Some(Outcome::Err(format!("오류: {e}")));
            }
        }
    }

    fn save_qr(&mut self) {
        let Some(png) = &self.qr_png else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("qr.png")
            .save_file()
        else {
            return;
        };
        self.qr_outcome = Some(match fs::write(&path, png) {
            Ok(()) => {
                info!(path = %path.display(), "QR code saved");
                Outcome::Ok(format!("저장됨: {}", path.display()))
            }
            Err(e) => Outcome::Err(format!("저장 실패: {e}")),
        });
    }

    fn refresh_qr_texture(&mut self, ctx: &egui::Context) {
        if !self.qr_texture_dirty {
            return;
        }
        self.qr_texture_dirty = false;
        let Some(png) = &self.qr_png else {
            return;
        };
        match image::load_from_memory(png) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                self.qr_texture =
                    Some(ctx.load_texture("qr_code", color, egui::TextureOptions::NEAREST));
            }
            Err(e) => {
                self.qr_outcome = Some(Outcome::Err(format!("이미지 표시 오류: {e}")));
            }
        }
    }

    fn ui_qr(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(ui, "Generate QR Code", "텍스트나 URL을 QR 코드 이미지로 만듭니다.");
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Enter Text or URL:");
                ui.text_edit_singleline(&mut self.qr_text);
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Generate QR Code").clicked() {
                    self.generate_qr();
                }
                if ui
                    .add_enabled(self.qr_png.is_some(), egui::Button::new("Save PNG…"))
                    .clicked()
                {
                    self.save_qr();
                }
            });
            outcome_label(ui, &self.qr_outcome);
        });
        self.refresh_qr_texture(ui.ctx());
        if let Some(texture) = &self.qr_texture {
            ui.add_space(8.0);
            let side = ui.available_width().min(360.0);
            ui.image((texture.id(), egui::vec2(side, side)));
            ui.label("Your QR Code");
        }
    }
}

fn currency_combo(ui: &mut egui::Ui, id: &str, value: &mut CurrencyCode) {
    egui::ComboBox::from_id_source(id)
        .selected_text(value.as_str())
        .show_ui(ui, |ui| {
            for code in CurrencyCode::ALL {
                ui.selectable_value(value, code, code.as_str());
            }
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(160.0)
            .default_width(200.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Length => Self::ui_unit_panel(ui, &mut self.length),
                    Tab::Weight => Self::ui_unit_panel(ui, &mut self.weight),
                    Tab::Temperature => Self::ui_unit_panel(ui, &mut self.temperature),
                    Tab::Currency => self.ui_currency(ui),
                    Tab::QrCode => self.ui_qr(ui),
                });
        });
    }
}
