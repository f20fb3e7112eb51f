use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_attribute = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_attribute, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_attribute:?}"
    );
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str, type_: &str) -> ElementRef<'a> {
    let input = form
        .select(&Selector::parse("input").unwrap())
        .find(|input| input.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("No input found with name \"{name}\" and type \"{type_}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input with type \"{type_}\", got {input_type:?}"
    );

    input
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str, required: bool) {
    let input = must_get_input(form, name, type_);
    let input_required = input.value().attr("required").is_some();

    assert_eq!(
        input_required, required,
        "want input with name {name} to have required={required}, got required={input_required}"
    );
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let input = must_get_input(form, name, type_);
    let input_value = input.value().attr("value").unwrap_or_default();

    assert_eq!(
        input_value, value,
        "want input with value \"{value}\", got {input_value:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_form_select_with_value(form: &ElementRef<'_>, name: &str, value: &str) {
    let select = form
        .select(&Selector::parse("select").unwrap())
        .find(|select| select.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

    let selected = select
        .select(&Selector::parse("option[selected]").unwrap())
        .next()
        .unwrap_or_else(|| panic!("No option selected for select \"{name}\""));
    let selected_value = selected.value().attr("value").unwrap_or_default();

    assert_eq!(
        selected_value, value,
        "want select {name} with value \"{value}\", got {selected_value:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
    let got_text = submit_button.text().collect::<Vec<_>>().join("");
    let got_text = got_text.trim();
    assert_eq!(text, got_text);
}
