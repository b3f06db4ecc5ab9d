use eframe::egui::{self, RichText, Ui};

use crate::data::{DatasetKind, MOON_COIN_TYPE, SUI_COIN_TYPE};
use crate::engine::PopupAnchorPolicy;
use crate::util::format_balance;

use super::super::render_utils::bucket_color;
use super::super::{SearchRequest, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_controls(
        &mut self,
        ui: &mut Ui,
        request: &mut Option<SearchRequest>,
    ) {
        ui.heading("Token Search");
        ui.add_space(4.0);

        ui.label("Coin type");
        ui.text_edit_singleline(&mut self.query_input)
            .on_hover_text("e.g. 0x2::sui::SUI");

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.kind_input, DatasetKind::Holders, "Holders")
                .on_hover_text("Rank wallets by share of total supply held.");
            ui.selectable_value(&mut self.kind_input, DatasetKind::Senders, "Senders")
                .on_hover_text("Rank wallets by share of outbound transfer volume.");
        });

        if ui.button("Find wallets").clicked() {
            let query = self.query_input.trim().to_string();
            match validate_coin_type(&query) {
                Ok(()) => {
                    self.query_error = None;
                    *request = Some(SearchRequest {
                        query,
                        kind: self.kind_input,
                    });
                }
                Err(message) => self.query_error = Some(message),
            }
        }

        if let Some(error) = &self.query_error {
            ui.colored_label(egui::Color32::from_rgb(248, 113, 113), error);
        }

        ui.horizontal(|ui| {
            ui.label("Demo:");
            if ui.small_button("SUI").clicked() {
                self.query_input = SUI_COIN_TYPE.to_owned();
                self.query_error = None;
                *request = Some(SearchRequest {
                    query: SUI_COIN_TYPE.to_owned(),
                    kind: self.kind_input,
                });
            }
            if ui.small_button("MOON").clicked() {
                self.query_input = MOON_COIN_TYPE.to_owned();
                self.query_error = None;
                *request = Some(SearchRequest {
                    query: MOON_COIN_TYPE.to_owned(),
                    kind: self.kind_input,
                });
            }
        });

        ui.separator();

        ui.label("Highlight wallets (address or tag)");
        ui.text_edit_singleline(&mut self.highlight_filter)
            .on_hover_text("Fuzzy-highlight matching bubbles without changing the layout.");

        ui.separator();
        ui.heading("View");

        ui.checkbox(&mut self.viewport.config.enable_touch, "Touch pinch zoom");
        ui.checkbox(
            &mut self.connection.use_ring_positions,
            "Connect from ring positions",
        )
        .on_hover_text("Anchor connection lines at the pre-separation ring layout.");

        ui.horizontal(|ui| {
            ui.label("Popup anchor");
            ui.selectable_value(
                &mut self.selection.config.policy,
                PopupAnchorPolicy::ClampToContainer,
                "At click",
            );
            ui.selectable_value(
                &mut self.selection.config.policy,
                PopupAnchorPolicy::Center,
                "Centered",
            );
        });

        ui.collapsing("Layout tuning", |ui| {
            let mut dirty = false;
            dirty |= ui
                .add(egui::Slider::new(&mut self.collision.padding, 0.0..=40.0).text("Padding"))
                .on_hover_text("Minimum gap kept between neighboring bubbles.")
                .changed();
            dirty |= ui
                .add(
                    egui::Slider::new(&mut self.collision.max_iterations, 1..=200)
                        .text("Max passes"),
                )
                .on_hover_text("Upper bound on overlap-resolution passes.")
                .changed();
            dirty |= ui
                .add(
                    egui::Slider::new(&mut self.collision.split_ratio, 0.1..=0.9)
                        .text("Split ratio"),
                )
                .on_hover_text("How much of each separation the first bubble absorbs.")
                .changed();
            dirty |= ui
                .add(egui::Slider::new(&mut self.layout.jitter_extent, 0.0..=50.0).text("Jitter"))
                .changed();
            ui.add(
                egui::Slider::new(&mut self.connection.arrow_offset, 0.0..=6.0)
                    .text("Arrow offset"),
            );

            if dirty {
                self.layout_dirty = true;
            }

            ui.label(format!("overlap passes used: {}", self.resolver_passes));
        });

        ui.separator();
        ui.label(RichText::new("Share legend").strong());
        let labels = [">20%", ">10%", ">5%", ">2%", ">1%", "<=1%"];
        for (bucket, label) in labels.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(bucket_color(bucket)));
                ui.label(*label);
            });
        }

        ui.separator();
        ui.label(RichText::new("Token").strong());
        ui.label(format!("Symbol: {}", self.dataset.token.symbol));
        ui.label(format!("Name: {}", self.dataset.token.name));
        if let Some(supply) = &self.dataset.token.total_supply {
            ui.label(format!(
                "Total supply: {}",
                format_balance(supply, self.dataset.token.decimals)
            ));
        }
        ui.label(format!(
            "Wallets found: {} ({})",
            self.dataset.records.len(),
            self.dataset.kind.label()
        ));
    }
}

fn validate_coin_type(query: &str) -> Result<(), String> {
    if query.is_empty() {
        return Err("Coin type is required".to_owned());
    }

    let parts = query.split("::").collect::<Vec<_>>();
    let shape_ok = parts.len() == 3
        && parts[0].len() > 2
        && parts[0].starts_with("0x")
        && parts[0][2..].chars().all(|c| c.is_ascii_hexdigit())
        && parts[1..]
            .iter()
            .all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_')
            });

    if shape_ok {
        Ok(())
    } else {
        Err("Invalid coin type format (e.g. 0x2::sui::SUI)".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::validate_coin_type;

    #[test]
    fn accepts_well_formed_coin_types() {
        assert!(validate_coin_type("0x2::sui::SUI").is_ok());
        assert!(
            validate_coin_type(
                "0x7b888393d6a552819bb0a7f878183abaf04550bfb9546b20ea586d338210826f::moon::MOON"
            )
            .is_ok()
        );
    }

    #[test]
    fn rejects_malformed_coin_types() {
        assert!(validate_coin_type("").is_err());
        assert!(validate_coin_type("sui::SUI").is_err());
        assert!(validate_coin_type("0x2::sui").is_err());
        assert!(validate_coin_type("0xzz::sui::SUI").is_err());
        assert!(validate_coin_type("0x2::su i::SUI").is_err());
    }
}
