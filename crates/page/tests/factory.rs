mod common;

use common::setup;
use page::{
    assert_exists, get_description, global_selector, selector, text, LazyChild, Page, PageError,
    PageNode, PageObject, Parent,
};

struct WithId {
    node: PageNode,
}

impl WithId {
    fn element_id(&self) -> Option<String> {
        self.element().and_then(|el| el.id())
    }
}

impl PageObject for WithId {
    fn from_node(node: PageNode) -> Self {
        Self { node }
    }

    fn node(&self) -> &PageNode {
        &self.node
    }
}

struct DivPage {
    node: PageNode,
    div: LazyChild<Page>,
    typed: LazyChild<WithId>,
}

impl PageObject for DivPage {
    fn from_node(node: PageNode) -> Self {
        Self {
            node,
            div: selector("div").unwrap(),
            typed: selector("div").unwrap(),
        }
    }

    fn node(&self) -> &PageNode {
        &self.node
    }
}

#[test]
fn test_selector_requires_a_selector() {
    setup("");
    assert!(matches!(selector::<Page>(""), Err(PageError::EmptySelector)));
    assert!(matches!(global_selector::<Page>("", None), Err(PageError::EmptySelector)));
}

#[test]
fn test_selector_without_class() {
    let doc = setup("<div></div>");
    let div = doc.query_selector("div").unwrap();
    let page = DivPage::from_node(PageNode::new("", Parent::Root, None));

    assert_eq!(page.div.get(&page).element(), div);
    assert_eq!(page.div.get(&page).at(0).element(), div);
}

#[test]
fn test_selector_with_class() {
    let doc = setup(r#"<div id="div1"></div>"#);
    let div = doc.query_selector("div").unwrap();
    let page = DivPage::from_node(PageNode::new("", Parent::Root, None));

    let typed = page.typed.get(&page);
    assert_eq!(typed.element(), div);
    assert_eq!(typed.element_id().as_deref(), Some("div1"));
    assert_eq!(typed.at(0).element(), div);
    assert_eq!(typed.at(0).element_id().as_deref(), Some("div1"));
}

#[test]
fn test_child_stays_live_after_memoization() {
    let doc = setup("<div>a</div>");
    let page = DivPage::from_node(PageNode::new("", Parent::Root, None));
    let div = page.div.get(&page);
    assert_eq!(div.len(), 1);

    doc.set_body_html("<div>b</div><div>c</div>").unwrap();
    let again = page.div.get(&page);
    assert!(div.node().ptr_eq(again.node()));
    assert_eq!(again.map(|d| text(d).unwrap_or_default()), vec!["b", "c"]);
}

struct SpanPage {
    node: PageNode,
    p: LazyChild<Page>,
    global_p: LazyChild<WithId>,
}

impl SpanPage {
    fn new(global_root: Option<page::Element>) -> Self {
        Self {
            node: PageNode::new("span", Parent::Root, None),
            p: selector("p").unwrap(),
            global_p: global_selector("p", global_root).unwrap(),
        }
    }
}

impl PageObject for SpanPage {
    fn from_node(node: PageNode) -> Self {
        Self {
            node,
            p: selector("p").unwrap(),
            global_p: global_selector("p", None).unwrap(),
        }
    }

    fn node(&self) -> &PageNode {
        &self.node
    }
}

#[test]
fn test_global_selector_without_root_element() {
    let doc = setup("<div><span></span><p></p></div><span></span>");
    let div = doc.query_selector("div").unwrap().unwrap();
    let p = doc.query_selector("p").unwrap();
    page::set_root(div);

    let page = SpanPage::new(None);
    assert_eq!(page.p.get(&page).element(), None);
    assert_eq!(page.global_p.get(&page).element(), p);
    assert_eq!(page.global_p.get(&page).at(0).element(), p);
}

#[test]
fn test_global_selector_with_root_element() {
    let doc = setup(r#"<div><span></span></div><section><p id="p1"></p></section>"#);
    let div = doc.query_selector("div").unwrap().unwrap();
    let section = doc.query_selector("section").unwrap();
    let p = doc.query_selector("p").unwrap();
    page::set_root(div);

    let page = SpanPage::new(section);
    assert_eq!(page.p.get(&page).element(), None);

    let global_p = page.global_p.get(&page);
    assert_eq!(global_p.element(), p);
    assert_eq!(global_p.element_id().as_deref(), Some("p1"));
    assert_eq!(global_p.at(0).element_id().as_deref(), Some("p1"));
    assert_eq!(global_p.description(), "p");
}

#[test]
fn test_global_child_method() {
    let doc = setup("<span></span><p id=\"p1\"></p>");
    let page = Page::new("span", Parent::Root);

    let local: Page = page.child("p").unwrap();
    let global: WithId = page.global_child("p", None).unwrap();
    assert_eq!(local.element(), None);
    assert_eq!(global.element(), doc.query_selector("p").unwrap());
    assert!(page.child::<Page>(" ").is_err());
}

#[test]
fn test_invalid_selector_is_rejected_eagerly() {
    setup("");
    let err = selector::<Page>("div[").unwrap_err();
    assert!(err.to_string().contains("div["), "{err}");
    assert!(selector::<Page>("> li").is_ok());
    assert!(Page::root().child::<Page>("~ li").is_ok());
}

struct Thing {
    node: PageNode,
    subthing: LazyChild<Page>,
}

impl Thing {
    fn subthing(&self) -> &Page {
        self.subthing.get(self)
    }
}

impl PageObject for Thing {
    fn from_node(node: PageNode) -> Self {
        Self {
            node,
            subthing: selector(".subthing").unwrap(),
        }
    }

    fn node(&self) -> &PageNode {
        &self.node
    }
}

struct App {
    node: PageNode,
    thing: LazyChild<Thing>,
    nested: LazyChild<Page>,
}

impl App {
    fn new(selector_text: &str) -> Self {
        Self::from_node(PageNode::new(selector_text, Parent::Root, None))
    }

    fn thing(&self) -> &Thing {
        self.thing.get(self)
    }
}

impl PageObject for App {
    fn from_node(node: PageNode) -> Self {
        Self {
            node,
            thing: selector(".thing").unwrap(),
            nested: selector("button").unwrap(),
        }
    }

    fn node(&self) -> &PageNode {
        &self.node
    }
}

#[test]
fn test_get_description() {
    setup("");
    let app = App::new("");
    assert_eq!(get_description(app.thing()), ".thing");
    assert_eq!(get_description(app.thing().subthing()), ".thing .subthing");
    assert_eq!(
        get_description(&app.thing().at(1).subthing().at(0)),
        ".thing[1] .subthing[0]"
    );
}

#[test]
fn test_assert_exists() {
    setup("<div>boop</div>");
    assert!(assert_exists("test", &Page::new("div", Parent::Root)).is_ok());

    setup("");
    let err = assert_exists("test", &Page::new("div", Parent::Root)).unwrap_err();
    assert!(err.to_string().contains("Tried selector `div`"));

    let app = App::new("div");
    let err = assert_exists("test", app.nested.get(&app)).unwrap_err();
    assert_eq!(err.to_string(), "test >> Tried selector `div button`");
    assert!(matches!(err, PageError::ElementMissing { .. }));
}

#[test]
fn test_text() {
    setup("<div>boop</div>");
    assert_eq!(text(&Page::new("div", Parent::Root)).as_deref(), Some("boop"));
    assert_eq!(text(&Page::new("button", Parent::Root)), None);
}
