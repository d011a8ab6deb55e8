//! Rendering of domain keyboards as Telegram inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::domain::prompt::{
    templates, Category, Keyboard, CALLBACK_APPROVE, CALLBACK_BACK, CALLBACK_HELP,
    CALLBACK_REFINE,
};

/// Builds the inline keyboard for a domain keyboard.
///
/// Categories are laid out two per row with Help on its own row.
pub fn inline_keyboard(keyboard: Keyboard) -> InlineKeyboardMarkup {
    let rows = match keyboard {
        Keyboard::Categories => {
            let mut rows: Vec<Vec<InlineKeyboardButton>> = Category::all()
                .chunks(2)
                .map(|pair| pair.iter().map(|c| category_button(*c)).collect())
                .collect();
            rows.push(vec![InlineKeyboardButton::callback(
                templates::BUTTON_HELP,
                CALLBACK_HELP,
            )]);
            rows
        }
        Keyboard::BackToMenu => vec![vec![InlineKeyboardButton::callback(
            templates::BUTTON_BACK,
            CALLBACK_BACK,
        )]],
        Keyboard::ApproveOrRefine => vec![vec![
            InlineKeyboardButton::callback(templates::BUTTON_APPROVE, CALLBACK_APPROVE),
            InlineKeyboardButton::callback(templates::BUTTON_REFINE, CALLBACK_REFINE),
        ]],
    };

    InlineKeyboardMarkup::new(rows)
}

fn category_button(category: Category) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(category.button_label(), category.as_str())
}
