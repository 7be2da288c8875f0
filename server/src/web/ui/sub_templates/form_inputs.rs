use crate::web::ui::form_values::{BoolFormValue, FormValue, FormValueRepresentation};
use askama::Template;
use std::borrow::Cow;

#[derive(Debug, PartialEq)]
pub enum InputType {
    Text,
    Textarea,
    Url,
    Tel,
    DateTimeLocal,
}

impl InputType {
    fn as_html_type_attr(&self) -> &'static str {
        match self {
            InputType::Text | InputType::Textarea => "text",
            InputType::Url => "url",
            InputType::Tel => "tel",
            InputType::DateTimeLocal => "datetime-local",
        }
    }
}

pub struct InputConfiguration<'a> {
    input_type: InputType,
    placeholder: Option<&'a str>,
    info: Option<&'a str>,
}

impl Default for InputConfiguration<'_> {
    fn default() -> Self {
        Self {
            input_type: InputType::Text,
            placeholder: None,
            info: None,
        }
    }
}

impl<'a> InputConfiguration<'a> {
    pub fn builder() -> InputConfigurationBuilder<'a> {
        InputConfigurationBuilder::default()
    }
}

#[derive(Default)]
pub struct InputConfigurationBuilder<'a> {
    value: InputConfiguration<'a>,
}

impl<'a> InputConfigurationBuilder<'a> {
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.value.input_type = input_type;
        self
    }
    pub fn info(mut self, info: &'a str) -> Self {
        self.value.info = Some(info);
        self
    }
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.value.placeholder = Some(placeholder);
        self
    }
    pub fn build(self) -> InputConfiguration<'a> {
        self.value
    }
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/form_field.html")]
pub struct FormFieldTemplate<'a, T: FormValueRepresentation> {
    name: &'a str,
    label: &'a str,
    config: InputConfiguration<'a>,
    data: &'a FormValue<T>,
}

impl<'a, T: FormValueRepresentation> FormFieldTemplate<'a, T> {
    pub fn new(
        data: &'a FormValue<T>,
        name: &'a str,
        label: &'a str,
        config: InputConfiguration<'a>,
    ) -> Self {
        Self {
            name,
            label,
            config,
            data,
        }
    }
}

pub struct SelectEntry<'a> {
    pub value: Cow<'a, str>,
    pub text: Cow<'a, str>,
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/select.html")]
pub struct SelectTemplate<'a, T: FormValueRepresentation> {
    name: &'a str,
    entries: &'a [SelectEntry<'a>],
    label: &'a str,
    data: &'a FormValue<T>,
}

impl<'a, T: FormValueRepresentation> SelectTemplate<'a, T> {
    pub fn new(
        data: &'a FormValue<T>,
        name: &'a str,
        entries: &'a [SelectEntry<'a>],
        label: &'a str,
    ) -> Self {
        Self {
            name,
            entries,
            label,
            data,
        }
    }

    fn is_selected(&self, entry: &SelectEntry) -> bool {
        entry.value == self.data.string_value()
    }
}

#[derive(Template)]
#[template(path = "sub_templates/form_inputs/checkbox.html")]
pub struct CheckboxTemplate<'a> {
    name: &'a str,
    label: &'a str,
    data: &'a BoolFormValue,
}

impl<'a> CheckboxTemplate<'a> {
    pub fn new(data: &'a BoolFormValue, name: &'a str, label: &'a str) -> Self {
        Self { name, label, data }
    }
}
